use std::cell::RefCell;
use std::path::{Path, PathBuf};

use tcgs_cuda::{Discovery, ProbeSource};
use tcgs_extension::{
    assemble, build_all, BuildConfig, BuildError, BuiltExtension, ExtensionBuilder,
    BUILD_EXT_COMMAND,
};
use tcgs_shared::ExtensionSpec;

/// Builder that records what it was asked to build
#[derive(Default)]
struct FakeBuilder {
    built: RefCell<Vec<String>>,
    fail: bool,
}

impl ExtensionBuilder for FakeBuilder {
    fn builder_name(&self) -> &'static str {
        "fake"
    }

    fn build(&self, ext: &ExtensionSpec, _source_root: &Path) -> Result<BuiltExtension, BuildError> {
        if self.fail {
            return Err(BuildError::Compile {
                library: ext.library_name(),
                message: "nvcc exited with status 1".to_string(),
            });
        }
        self.built.borrow_mut().push(ext.name.clone());
        Ok(BuiltExtension {
            module: ext.name.clone(),
            libraries: vec![ext.library_name()],
        })
    }
}

fn cuda_found() -> Discovery {
    Discovery {
        include_dirs: vec![PathBuf::from("/opt/cuda/include")],
        source: Some(ProbeSource::CommonPath),
        warning: None,
    }
}

#[test]
fn test_manifest_without_builder_is_metadata_only() {
    let manifest = assemble(&BuildConfig::default(), &cuda_found(), None);

    assert_eq!(manifest.name, "diff_gaussian_rasterization");
    assert_eq!(manifest.packages, vec!["diff_gaussian_rasterization"]);
    assert!(manifest.ext_modules.is_empty());
    assert!(manifest.build_commands.is_empty());
}

#[test]
fn test_manifest_with_builder_registers_command() {
    let builder = FakeBuilder::default();
    let manifest = assemble(&BuildConfig::default(), &cuda_found(), Some(&builder));

    assert_eq!(manifest.ext_modules.len(), 1);
    let ext = &manifest.ext_modules[0];
    assert_eq!(ext.name, "diff_gaussian_rasterization._C");
    assert_eq!(ext.include_dirs.last(), Some(&PathBuf::from("/opt/cuda/include")));
    assert_eq!(
        manifest.build_commands.get(BUILD_EXT_COMMAND).map(String::as_str),
        Some("fake")
    );
}

#[test]
fn test_build_all_runs_builder_per_extension() {
    let builder = FakeBuilder::default();
    let manifest = assemble(&BuildConfig::default(), &cuda_found(), Some(&builder));

    let built = build_all(&manifest.ext_modules, Path::new("."), &builder).unwrap();

    assert_eq!(built.len(), 1);
    assert_eq!(built[0].libraries, vec!["diff_gaussian_rasterization__C"]);
    assert_eq!(*builder.built.borrow(), vec!["diff_gaussian_rasterization._C"]);
}

#[test]
fn test_build_all_propagates_compile_error() {
    let builder = FakeBuilder {
        fail: true,
        ..Default::default()
    };
    let manifest = assemble(&BuildConfig::default(), &cuda_found(), Some(&builder));

    let err = build_all(&manifest.ext_modules, Path::new("."), &builder).unwrap_err();
    assert_eq!(
        err.to_string(),
        "compiling diff_gaussian_rasterization__C failed: nvcc exited with status 1"
    );
}

#[test]
fn test_manifest_json_shape() {
    let builder = FakeBuilder::default();
    let manifest = assemble(&BuildConfig::default(), &cuda_found(), Some(&builder));
    let json: serde_json::Value =
        serde_json::from_str(&manifest.to_json_pretty().unwrap()).unwrap();

    let ext = &json["ext_modules"][0];
    assert_eq!(ext["extra_compile_args"]["cxx"][0], "-DTCGS_ENABLED=1");
    assert_eq!(ext["extra_compile_args"]["nvcc"][2], "-DTCGS_ENABLED=1");
    assert_eq!(json["build_commands"]["build_ext"], "fake");
}
