//! Error types for configuration and builds

use std::path::PathBuf;
use thiserror::Error;

/// Configuration could not be loaded or is inconsistent
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Extension build failure
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("source file not found: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("no host builder available (built without the `native` feature)")]
    NoHostBuilder,

    #[error("compiling {library} failed: {message}")]
    Compile { library: String, message: String },
}
