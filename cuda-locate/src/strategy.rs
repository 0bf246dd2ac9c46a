//! Candidate-resolution strategies
//!
//! Each strategy inspects one kind of hint (an explicit root, an environment
//! prefix, the compiler location, well-known install paths) and returns the
//! first include directory it accepts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::probe::Probe;

/// Variables naming the CUDA installation root, highest precedence first
pub const ROOT_VARS: [&str; 2] = ["CUDA_HOME", "CUDA_PATH"];

/// Virtual/conda environment prefix variable
pub const PREFIX_VAR: &str = "CONDA_PREFIX";

/// Variable naming an alternative compiler binary
pub const NVCC_VAR: &str = "NVCC";

/// Headers whose presence marks a CUDA include directory
pub const CUDA_HEADERS: [&str; 2] = ["cuda_runtime.h", "cuda.h"];

/// Subfolder shipped in every CUDA include directory
pub const CUDA_SUBDIR: &str = "crt";

/// How strictly candidate directories are checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Validation {
    /// Directory must exist and contain CUDA headers
    #[default]
    Headers,
    /// Directory only has to exist
    Exists,
}

impl Validation {
    /// Check a candidate include directory
    pub fn accepts(self, probe: &dyn Probe, dir: &Path) -> bool {
        match self {
            Validation::Exists => probe.is_dir(dir),
            Validation::Headers => probe.is_dir(dir) && has_cuda_headers(probe, dir),
        }
    }
}

impl std::str::FromStr for Validation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "headers" => Ok(Validation::Headers),
            "exists" => Ok(Validation::Exists),
            _ => Err(format!("Invalid validation mode: {}", s)),
        }
    }
}

/// Whether `dir` looks like a CUDA include directory
pub fn has_cuda_headers(probe: &dyn Probe, dir: &Path) -> bool {
    CUDA_HEADERS.iter().any(|h| probe.is_file(&dir.join(h)))
        || probe.is_dir(&dir.join(CUDA_SUBDIR))
}

/// Where an accepted include directory came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbeSource {
    /// Explicit installation root (`CUDA_HOME` / `CUDA_PATH`)
    RootOverride { var: String },
    /// Environment prefix (`CONDA_PREFIX`)
    EnvPrefix { var: String },
    /// Inferred from the location of `nvcc`
    Compiler { nvcc: PathBuf },
    /// One of the well-known installation paths
    CommonPath,
}

impl fmt::Display for ProbeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeSource::RootOverride { var } => write!(f, "${}", var),
            ProbeSource::EnvPrefix { var } => write!(f, "${} prefix", var),
            ProbeSource::Compiler { nvcc } => write!(f, "nvcc at {}", nvcc.display()),
            ProbeSource::CommonPath => f.write_str("common install path"),
        }
    }
}

/// An include directory accepted by a strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    pub include: PathBuf,
    pub source: ProbeSource,
}

/// One step of the search order
pub trait Strategy {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Try to produce an include directory
    fn resolve(&self, probe: &dyn Probe, validation: Validation) -> Option<Found>;
}

/// `CUDA_HOME`, else `CUDA_PATH`, with `include` appended
#[derive(Debug, Default)]
pub struct RootOverride;

impl Strategy for RootOverride {
    fn name(&self) -> &'static str {
        "root-override"
    }

    fn resolve(&self, probe: &dyn Probe, validation: Validation) -> Option<Found> {
        // Only the first variable that is set counts.
        let (var, root) = ROOT_VARS
            .iter()
            .find_map(|var| probe.var(var).map(|value| (*var, value)))?;

        let include = Path::new(&root).join("include");
        if validation.accepts(probe, &include) {
            return Some(Found {
                include,
                source: ProbeSource::RootOverride {
                    var: var.to_string(),
                },
            });
        }

        debug!("${} set but {} is not a CUDA include dir", var, include.display());
        None
    }
}

/// `CONDA_PREFIX/include`, its parent's `include`, then the packaged toolkit path
#[derive(Debug, Default)]
pub struct EnvPrefix;

impl EnvPrefix {
    fn candidates(prefix: &Path, validation: Validation) -> Vec<PathBuf> {
        let mut candidates = vec![prefix.join("include")];
        if let Some(parent) = prefix.parent() {
            candidates.push(parent.join("include"));
        }
        if validation == Validation::Headers {
            if let Some(target) = conda_target_dir() {
                candidates.push(prefix.join("targets").join(target).join("include"));
            }
        }
        candidates
    }
}

impl Strategy for EnvPrefix {
    fn name(&self) -> &'static str {
        "env-prefix"
    }

    fn resolve(&self, probe: &dyn Probe, validation: Validation) -> Option<Found> {
        let prefix = PathBuf::from(probe.var(PREFIX_VAR)?);

        // Prefix include dirs hold plenty of non-CUDA headers, so headers are
        // required regardless of the validation mode.
        Self::candidates(&prefix, validation)
            .into_iter()
            .find(|dir| Validation::Headers.accepts(probe, dir))
            .map(|include| Found {
                include,
                source: ProbeSource::EnvPrefix {
                    var: PREFIX_VAR.to_string(),
                },
            })
    }
}

/// Toolkit root inferred from the `nvcc` binary on the search path
#[derive(Debug, Default)]
pub struct Compiler;

impl Compiler {
    fn candidate_roots(bin_dir: &Path, validation: Validation) -> Vec<PathBuf> {
        let mut roots = Vec::new();
        if bin_dir.file_name().is_some_and(|n| n == "bin") {
            if let Some(root) = bin_dir.parent() {
                roots.push(root.to_path_buf());
            }
        }
        if validation == Validation::Headers {
            roots.push(bin_dir.to_path_buf());
        }
        roots
    }
}

impl Strategy for Compiler {
    fn name(&self) -> &'static str {
        "compiler"
    }

    fn resolve(&self, probe: &dyn Probe, validation: Validation) -> Option<Found> {
        let binary = probe.var(NVCC_VAR).unwrap_or_else(|| "nvcc".to_string());
        let nvcc = probe.which(&binary)?;
        let bin_dir = nvcc.parent()?;

        Self::candidate_roots(bin_dir, validation)
            .into_iter()
            .map(|root| root.join("include"))
            .find(|dir| validation.accepts(probe, dir))
            .map(|include| Found {
                include,
                source: ProbeSource::Compiler { nvcc: nvcc.clone() },
            })
    }
}

/// Well-known installation paths, checked in order
#[derive(Debug)]
pub struct CommonPaths {
    paths: Vec<PathBuf>,
}

impl CommonPaths {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl Strategy for CommonPaths {
    fn name(&self) -> &'static str {
        "common-paths"
    }

    fn resolve(&self, probe: &dyn Probe, validation: Validation) -> Option<Found> {
        self.paths
            .iter()
            .find(|dir| validation.accepts(probe, dir))
            .map(|include| Found {
                include: include.clone(),
                source: ProbeSource::CommonPath,
            })
    }
}

/// Install paths CUDA historically lands in
pub fn default_common_paths() -> Vec<PathBuf> {
    [
        "/usr/local/cuda/include",
        "/usr/local/cuda-12/include",
        "/usr/local/cuda-11/include",
        "/opt/cuda/include",
        "/usr/include",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

/// `targets/<dir>` used by packaged conda toolkits for this architecture
pub fn conda_target_dir() -> Option<&'static str> {
    match std::env::consts::ARCH {
        "x86_64" => Some("x86_64-linux"),
        "aarch64" => Some("sbsa-linux"),
        // Toolkits only ship for little-endian POWER.
        "powerpc64" if cfg!(target_endian = "little") => Some("ppc64le-linux"),
        _ => None,
    }
}
