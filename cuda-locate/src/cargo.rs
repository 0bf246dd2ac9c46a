//! Build-script integration
//!
//! Turns a [`Discovery`] into `cargo:` directives so a `build.rs` re-runs when
//! the CUDA environment changes and dependents can pick up the include path.

use crate::locator::Discovery;
use crate::strategy::{NVCC_VAR, PREFIX_VAR, ROOT_VARS};

/// Environment variables that can change the discovery result
pub fn watched_env_vars() -> Vec<&'static str> {
    let mut vars = ROOT_VARS.to_vec();
    vars.extend([PREFIX_VAR, NVCC_VAR, "PATH"]);
    vars
}

/// Directives for a discovery result
pub fn cargo_directives(discovery: &Discovery) -> Vec<String> {
    let mut lines: Vec<String> = watched_env_vars()
        .into_iter()
        .map(|var| format!("cargo:rerun-if-env-changed={}", var))
        .collect();

    for dir in &discovery.include_dirs {
        lines.push(format!("cargo:include={}", dir.display()));
    }

    if let Some(warning) = &discovery.warning {
        lines.push(format!("cargo:warning={}", warning));
    }

    lines
}

/// Print the directives to stdout (for use inside `build.rs`)
pub fn emit_cargo_directives(discovery: &Discovery) {
    for line in cargo_directives(discovery) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::ProbeSource;
    use std::path::PathBuf;

    #[test]
    fn test_directives_for_found() {
        let discovery = Discovery {
            include_dirs: vec![PathBuf::from("/usr/local/cuda/include")],
            source: Some(ProbeSource::CommonPath),
            warning: None,
        };
        let lines = cargo_directives(&discovery);
        assert!(lines.contains(&"cargo:rerun-if-env-changed=CUDA_HOME".to_string()));
        assert!(lines.contains(&"cargo:rerun-if-env-changed=CONDA_PREFIX".to_string()));
        assert!(lines.contains(&"cargo:include=/usr/local/cuda/include".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("cargo:warning=")));
    }

    #[test]
    fn test_directives_for_missing() {
        let discovery = Discovery {
            include_dirs: vec![],
            source: None,
            warning: Some("nothing here".to_string()),
        };
        let lines = cargo_directives(&discovery);
        let warnings: Vec<_> = lines
            .iter()
            .filter(|l| l.starts_with("cargo:warning="))
            .collect();
        assert_eq!(warnings, vec!["cargo:warning=nothing here"]);
        assert!(!lines.iter().any(|l| l.starts_with("cargo:include=")));
    }
}
