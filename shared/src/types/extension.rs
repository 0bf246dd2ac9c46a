//! Native extension and package descriptors
//!
//! These types describe what the host builder receives: one entry per
//! compiled extension plus the package metadata shipped alongside it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Compiler a flag list is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toolchain {
    /// CUDA device-code compiler
    Nvcc,
    /// Host C++ compiler
    Cxx,
}

impl Toolchain {
    /// Pick the toolchain that compiles a source file, based on its extension
    pub fn for_source(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "cu" => Some(Toolchain::Nvcc),
            "cpp" | "cc" | "cxx" => Some(Toolchain::Cxx),
            _ => None,
        }
    }
}

/// A single native extension to compile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionSpec {
    /// Dotted module name (e.g. `diff_gaussian_rasterization._C`)
    pub name: String,

    /// Source files, relative to the source root
    pub sources: Vec<PathBuf>,

    /// Header search directories, in priority order
    pub include_dirs: Vec<PathBuf>,

    /// Extra flags per toolchain
    pub extra_compile_args: BTreeMap<Toolchain, Vec<String>>,
}

impl ExtensionSpec {
    /// Create an extension with no include directories or flags
    pub fn new(name: impl Into<String>, sources: Vec<PathBuf>) -> Self {
        Self {
            name: name.into(),
            sources,
            include_dirs: Vec::new(),
            extra_compile_args: BTreeMap::new(),
        }
    }

    /// Flags for one toolchain (empty when none were configured)
    pub fn flags(&self, toolchain: Toolchain) -> &[String] {
        self.extra_compile_args
            .get(&toolchain)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sources compiled by the given toolchain
    pub fn sources_for(&self, toolchain: Toolchain) -> impl Iterator<Item = &PathBuf> {
        self.sources
            .iter()
            .filter(move |s| Toolchain::for_source(s) == Some(toolchain))
    }

    /// Static library name derived from the module name
    pub fn library_name(&self) -> String {
        crate::utils::library_name(&self.name)
    }
}

/// Distributable package description handed to the host builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Distribution name
    pub name: String,

    /// Packages shipped next to the compiled extension
    pub packages: Vec<String>,

    /// Extensions to compile
    pub ext_modules: Vec<ExtensionSpec>,

    /// Build command name -> builder responsible for it
    pub build_commands: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Manifest carrying only package metadata (no extensions, no build commands)
    pub fn metadata_only(name: impl Into<String>, packages: Vec<String>) -> Self {
        Self {
            name: name.into(),
            packages,
            ext_modules: Vec::new(),
            build_commands: BTreeMap::new(),
        }
    }

    /// Whether anything needs compiling
    pub fn has_extensions(&self) -> bool {
        !self.ext_modules.is_empty()
    }

    /// Serialize to pretty JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
