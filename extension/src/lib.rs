//! Native extension descriptor for the TC-GS rasterizer
//!
//! Assembles what a host builder needs (extension name, sources, include
//! directories, per-toolchain flags) plus the package metadata shipped with
//! it, and optionally compiles the extension through the `cc` crate.

pub mod builder;
#[cfg(feature = "native")]
pub mod cc_builder;
pub mod config;
pub mod descriptor;
pub mod error;

pub use builder::{
    build_all, check_sources, host_builder, BuildOptions, BuiltExtension, ExtensionBuilder,
    BUILD_EXT_COMMAND,
};
pub use config::BuildConfig;
pub use descriptor::{assemble, extension_spec};
pub use error::{BuildError, ConfigError};
