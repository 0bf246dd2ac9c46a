//! Access to the build environment
//!
//! Discovery only ever reads environment variables, looks up executables and
//! checks whether paths exist. Everything goes through [`Probe`] so the search
//! order can be exercised against fake environments.

use std::path::{Path, PathBuf};

/// Read-only view of the environment discovery runs in
pub trait Probe {
    /// Value of an environment variable. Unset and empty values are `None`.
    fn var(&self, key: &str) -> Option<String>;

    /// Resolve an executable on the search path
    fn which(&self, binary: &str) -> Option<PathBuf>;

    /// Whether `path` is an existing directory
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    /// Whether `path` is an existing regular file
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl Probe for SystemProbe {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }

    fn which(&self, binary: &str) -> Option<PathBuf> {
        which::which(binary).ok()
    }
}
