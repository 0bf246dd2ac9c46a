//! Host builder seam
//!
//! The descriptor only assembles input for a builder. Whether a builder is
//! available depends on the `native` feature; without one the package
//! manifest carries metadata only.

use std::path::{Path, PathBuf};
use tcgs_shared::ExtensionSpec;
use tracing::info;

use crate::error::BuildError;

/// Command the builder is registered under in the package manifest
pub const BUILD_EXT_COMMAND: &str = "build_ext";

/// A compiled extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltExtension {
    /// Dotted module name
    pub module: String,

    /// Static libraries produced, in link order
    pub libraries: Vec<String>,
}

/// Something that can compile an [`ExtensionSpec`]
pub trait ExtensionBuilder {
    /// Name of the build command this builder serves
    fn command_name(&self) -> &'static str {
        BUILD_EXT_COMMAND
    }

    /// Identifier recorded in the package manifest
    fn builder_name(&self) -> &'static str;

    /// Compile one extension whose sources are relative to `source_root`
    fn build(&self, ext: &ExtensionSpec, source_root: &Path) -> Result<BuiltExtension, BuildError>;
}

/// Settings for the native builder
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Output directory (`OUT_DIR` when unset)
    pub out_dir: Option<PathBuf>,

    /// Target triple (the host triple when unset)
    pub target: Option<String>,

    /// Optimization level passed to both compilers
    pub opt_level: u32,

    /// Print `cargo:` link directives (only meaningful inside `build.rs`)
    pub cargo_metadata: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            out_dir: None,
            target: None,
            opt_level: 3,
            cargo_metadata: true,
        }
    }
}

/// The builder compiled into this crate, if any
#[cfg(feature = "native")]
pub fn host_builder(options: &BuildOptions) -> Option<Box<dyn ExtensionBuilder>> {
    Some(Box::new(crate::cc_builder::CcBuilder::new(options.clone())))
}

/// The builder compiled into this crate, if any
#[cfg(not(feature = "native"))]
pub fn host_builder(_options: &BuildOptions) -> Option<Box<dyn ExtensionBuilder>> {
    None
}

/// Fail early when a source file is missing
pub fn check_sources(ext: &ExtensionSpec, source_root: &Path) -> Result<(), BuildError> {
    for source in &ext.sources {
        let path = source_root.join(source);
        if !path.is_file() {
            return Err(BuildError::MissingSource(path));
        }
    }
    Ok(())
}

/// Compile every extension of a manifest in order
pub fn build_all(
    ext_modules: &[ExtensionSpec],
    source_root: &Path,
    builder: &dyn ExtensionBuilder,
) -> Result<Vec<BuiltExtension>, BuildError> {
    let mut built = Vec::with_capacity(ext_modules.len());
    for ext in ext_modules {
        info!("Building extension {} with {}", ext.name, builder.builder_name());
        built.push(builder.build(ext, source_root)?);
    }
    Ok(built)
}
