//! Extension descriptor assembly

use std::collections::BTreeMap;
use tcgs_cuda::Discovery;
use tcgs_shared::{ExtensionSpec, PackageManifest, Toolchain};
use tracing::{debug, info, warn};

use crate::builder::ExtensionBuilder;
use crate::config::BuildConfig;

/// Describe the extension: sources, include dirs and per-toolchain flags.
///
/// Project include dirs come first, followed by whatever CUDA discovery found.
pub fn extension_spec(config: &BuildConfig, cuda: &Discovery) -> ExtensionSpec {
    let mut include_dirs = config.resolved_include_dirs();
    include_dirs.extend(cuda.include_dirs.iter().cloned());

    let mut extra_compile_args = BTreeMap::new();
    extra_compile_args.insert(Toolchain::Nvcc, config.nvcc_args());
    extra_compile_args.insert(Toolchain::Cxx, config.cxx_args());

    debug!(
        "Extension {}: {} sources, {} include dirs",
        config.extension_name,
        config.sources.len(),
        include_dirs.len()
    );

    ExtensionSpec {
        name: config.extension_name.clone(),
        sources: config.sources.clone(),
        include_dirs,
        extra_compile_args,
    }
}

/// Assemble the package manifest.
///
/// Without a host builder the manifest keeps its name and packages but lists
/// no extensions and no build commands.
pub fn assemble(
    config: &BuildConfig,
    cuda: &Discovery,
    builder: Option<&dyn ExtensionBuilder>,
) -> PackageManifest {
    let mut manifest =
        PackageManifest::metadata_only(config.package_name.clone(), config.packages.clone());

    let Some(builder) = builder else {
        warn!("No host builder available; package manifest carries metadata only");
        return manifest;
    };

    manifest.ext_modules.push(extension_spec(config, cuda));
    manifest.build_commands.insert(
        builder.command_name().to_string(),
        builder.builder_name().to_string(),
    );

    info!(
        "Assembled manifest for {} ({} extension(s))",
        manifest.name,
        manifest.ext_modules.len()
    );
    manifest
}
