//! Native builder backed by the `cc` crate
//!
//! `.cu` sources go through nvcc with the nvcc flags, C++ sources through the
//! host compiler with the cxx flags. Each half becomes its own static library.

use std::path::{Path, PathBuf};
use tcgs_shared::{ExtensionSpec, Toolchain};
use tracing::{debug, info};

use crate::builder::{check_sources, BuildOptions, BuiltExtension, ExtensionBuilder};
use crate::error::BuildError;

/// Triple the builder itself runs on
pub const HOST_TARGET: &str = env!("TCGS_HOST_TARGET");

#[derive(Debug, Clone, Default)]
pub struct CcBuilder {
    options: BuildOptions,
}

impl CcBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    fn base(&self, ext: &ExtensionSpec, toolchain: Toolchain) -> cc::Build {
        let mut build = cc::Build::new();
        build
            .cargo_metadata(self.options.cargo_metadata)
            .opt_level(self.options.opt_level)
            .debug(false);

        if let Some(out_dir) = &self.options.out_dir {
            build.out_dir(out_dir);
        }
        // Outside a build script `TARGET` and `HOST` are unset, so both are
        // always given explicitly.
        let target = self.options.target.as_deref().unwrap_or(HOST_TARGET);
        build.target(target).host(HOST_TARGET);

        match toolchain {
            Toolchain::Nvcc => build.cuda(true),
            Toolchain::Cxx => build.cpp(true),
        };

        for dir in &ext.include_dirs {
            build.include(dir);
        }
        for flag in ext.flags(toolchain) {
            build.flag(flag.as_str());
        }
        build
    }

    fn compile(
        &self,
        ext: &ExtensionSpec,
        toolchain: Toolchain,
        files: &[PathBuf],
        library: &str,
    ) -> Result<(), BuildError> {
        debug!("{:?}: compiling {} file(s) into {}", toolchain, files.len(), library);

        self.base(ext, toolchain)
            .files(files)
            .try_compile(library)
            .map_err(|e| BuildError::Compile {
                library: library.to_string(),
                message: e.to_string(),
            })
    }
}

impl ExtensionBuilder for CcBuilder {
    fn builder_name(&self) -> &'static str {
        "cc"
    }

    fn build(&self, ext: &ExtensionSpec, source_root: &Path) -> Result<BuiltExtension, BuildError> {
        check_sources(ext, source_root)?;

        let base_name = ext.library_name();
        let mut libraries = Vec::new();

        for (toolchain, suffix) in [(Toolchain::Nvcc, "_cuda"), (Toolchain::Cxx, "")] {
            let files: Vec<PathBuf> = ext
                .sources_for(toolchain)
                .map(|s| source_root.join(s))
                .collect();
            if files.is_empty() {
                continue;
            }

            let library = format!("{}{}", base_name, suffix);
            self.compile(ext, toolchain, &files, &library)?;
            libraries.push(library);
        }

        info!("Built {} ({})", ext.name, libraries.join(", "));
        Ok(BuiltExtension {
            module: ext.name.clone(),
            libraries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sources_fail_before_compiling() {
        let tmp = tempfile::tempdir().unwrap();
        let ext = ExtensionSpec::new("m._C", vec![PathBuf::from("forward.cu")]);
        let builder = CcBuilder::new(BuildOptions {
            out_dir: Some(tmp.path().join("out")),
            cargo_metadata: false,
            ..Default::default()
        });

        let err = builder.build(&ext, tmp.path()).unwrap_err();
        assert!(matches!(err, BuildError::MissingSource(_)));
        assert!(!tmp.path().join("out").exists());
    }

    #[test]
    fn test_builds_host_source_without_target() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("ext.cpp"), "int tcgs_answer() { return 42; }\n").unwrap();
        let ext = ExtensionSpec::new("m._C", vec![PathBuf::from("ext.cpp")]);
        let builder = CcBuilder::new(BuildOptions {
            out_dir: Some(tmp.path().join("out")),
            target: None,
            cargo_metadata: false,
            ..Default::default()
        });

        let built = builder.build(&ext, tmp.path()).unwrap();
        assert_eq!(built.libraries, vec!["m__C"]);
        assert!(tmp.path().join("out").join("libm__C.a").is_file());
    }

    #[test]
    fn test_host_target_captured_at_build_time() {
        assert!(!HOST_TARGET.is_empty());
    }

    #[test]
    fn test_builder_name() {
        assert_eq!(CcBuilder::default().builder_name(), "cc");
    }
}
