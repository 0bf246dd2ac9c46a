//! Ordered CUDA include-directory search

use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::probe::Probe;
use crate::strategy::{
    default_common_paths, CommonPaths, Compiler, EnvPrefix, ProbeSource, RootOverride, Strategy,
    Validation,
};

/// Message logged when no CUDA include directory could be found
pub const NOT_FOUND_WARNING: &str =
    "CUDA include directory not found; relying on the host builder's own CUDA paths";

/// Result of a discovery run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discovery {
    /// Accepted include directories (empty or exactly one entry)
    pub include_dirs: Vec<PathBuf>,

    /// Strategy that produced `include_dirs`
    pub source: Option<ProbeSource>,

    /// Single-line diagnostic when nothing was found
    pub warning: Option<String>,
}

impl Discovery {
    /// Whether an include directory was found
    pub fn is_found(&self) -> bool {
        !self.include_dirs.is_empty()
    }
}

/// CUDA include-directory locator
///
/// Strategies run in a fixed order: root override, environment prefix,
/// compiler location, common paths. The first one that accepts a directory
/// wins and the remaining strategies are never consulted.
#[derive(Debug, Clone)]
pub struct Locator {
    validation: Validation,
    common_paths: Vec<PathBuf>,
}

impl Locator {
    /// Header-verifying locator over the default install paths
    pub fn new() -> Self {
        Self {
            validation: Validation::default(),
            common_paths: default_common_paths(),
        }
    }

    /// Set how strictly candidates are checked
    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    /// Replace the list of well-known install paths
    pub fn with_common_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.common_paths = paths;
        self
    }

    pub fn validation(&self) -> Validation {
        self.validation
    }

    fn strategies(&self) -> Vec<Box<dyn Strategy>> {
        vec![
            Box::new(RootOverride),
            Box::new(EnvPrefix),
            Box::new(Compiler),
            Box::new(CommonPaths::new(self.common_paths.clone())),
        ]
    }

    /// Run the search. Never fails: an empty result comes with a warning.
    pub fn locate(&self, probe: &dyn Probe) -> Discovery {
        for strategy in self.strategies() {
            match strategy.resolve(probe, self.validation) {
                Some(found) => {
                    info!(
                        "Found CUDA include dir {} (via {})",
                        found.include.display(),
                        found.source
                    );
                    return Discovery {
                        include_dirs: vec![found.include],
                        source: Some(found.source),
                        warning: None,
                    };
                }
                None => debug!("CUDA probe '{}' found nothing", strategy.name()),
            }
        }

        warn!("{}", NOT_FOUND_WARNING);
        Discovery {
            include_dirs: Vec::new(),
            source: None,
            warning: Some(NOT_FOUND_WARNING.to_string()),
        }
    }
}

impl Default for Locator {
    fn default() -> Self {
        Self::new()
    }
}
