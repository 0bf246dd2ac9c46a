//! Build configuration
//!
//! Defaults describe the TC-GS rasterizer extension. A TOML file (by default
//! `tcgs.toml`) and `TCGS_*` environment variables may override any field.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tcgs_cuda::Validation;
use tcgs_shared::utils::{define_flag, is_c_identifier};

use crate::error::ConfigError;

/// Configuration file looked up when none is given explicitly
pub const DEFAULT_CONFIG_FILE: &str = "tcgs.toml";

/// Prefix of environment overrides (`TCGS_EXTENSION_NAME`, ...)
pub const ENV_PREFIX: &str = "TCGS";

const LIST_KEYS: [&str; 5] = ["packages", "sources", "include_dirs", "nvcc_flags", "cxx_flags"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Dotted module name of the compiled extension
    pub extension_name: String,

    /// Distribution name
    pub package_name: String,

    /// Packages shipped alongside the extension
    pub packages: Vec<String>,

    /// Directory the sources and include dirs are relative to
    pub source_root: PathBuf,

    /// Extension sources
    pub sources: Vec<PathBuf>,

    /// Project include directories (CUDA include dirs are appended after these)
    pub include_dirs: Vec<PathBuf>,

    /// Feature macro defined as `1` for both nvcc and the host compiler
    pub feature_define: String,

    /// Extra nvcc flags, before the feature define
    pub nvcc_flags: Vec<String>,

    /// Extra host compiler flags, before the feature define
    pub cxx_flags: Vec<String>,

    /// How strictly CUDA include candidates are checked
    pub validation: Validation,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            extension_name: "diff_gaussian_rasterization._C".to_string(),
            package_name: "diff_gaussian_rasterization".to_string(),
            packages: vec!["diff_gaussian_rasterization".to_string()],
            source_root: PathBuf::from("."),
            sources: [
                "cuda_rasterizer/rasterizer_impl.cu",
                "cuda_rasterizer/forward.cu",
                "cuda_rasterizer/backward.cu",
                "cuda_rasterizer/tcgs/tcgs_forward.cu",
                "rasterize_points.cu",
                "ext.cpp",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
            include_dirs: ["cuda_rasterizer", "third_party/glm/", "cuda_rasterizer/tcgs"]
                .iter()
                .map(PathBuf::from)
                .collect(),
            feature_define: "TCGS_ENABLED".to_string(),
            nvcc_flags: vec![
                "--expt-relaxed-constexpr".to_string(),
                "--ptxas-options=-v".to_string(),
            ],
            cxx_flags: Vec::new(),
            validation: Validation::Headers,
        }
    }
}

impl BuildConfig {
    /// Load configuration from `path` (required) or `tcgs.toml` (optional),
    /// layered under `TCGS_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        let mut env = config::Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .list_separator(",");
        for key in LIST_KEYS {
            env = env.with_list_parse_key(key);
        }

        let config: Self = config::Config::builder()
            .add_source(config::File::from(file).required(path.is_some()))
            .add_source(env)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extension_name.trim().is_empty() {
            return Err(ConfigError::Invalid("extension name is empty".to_string()));
        }

        if self.package_name.trim().is_empty() {
            return Err(ConfigError::Invalid("package name is empty".to_string()));
        }

        if self.sources.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one source file is required".to_string(),
            ));
        }

        if !is_c_identifier(&self.feature_define) {
            return Err(ConfigError::Invalid(format!(
                "feature define '{}' is not a valid C identifier",
                self.feature_define
            )));
        }

        Ok(())
    }

    /// Full nvcc flag list, feature define last
    pub fn nvcc_args(&self) -> Vec<String> {
        let mut args = self.nvcc_flags.clone();
        args.push(define_flag(&self.feature_define));
        args
    }

    /// Full host compiler flag list, feature define last
    pub fn cxx_args(&self) -> Vec<String> {
        let mut args = self.cxx_flags.clone();
        args.push(define_flag(&self.feature_define));
        args
    }

    /// Source root as an absolute path, independent of the working directory
    pub fn absolute_source_root(&self) -> PathBuf {
        self.source_root
            .canonicalize()
            .or_else(|_| std::env::current_dir().map(|cwd| cwd.join(&self.source_root)))
            .unwrap_or_else(|_| self.source_root.clone())
    }

    /// Project include dirs resolved against the absolute source root
    pub fn resolved_include_dirs(&self) -> Vec<PathBuf> {
        let root = self.absolute_source_root();
        self.include_dirs.iter().map(|dir| root.join(dir)).collect()
    }
}
