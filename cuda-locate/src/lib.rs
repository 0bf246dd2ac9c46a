//! CUDA toolkit discovery
//!
//! Locates a usable CUDA include directory across developer and CI machines.
//! The search never fails: when nothing is found the result is empty and a
//! single warning is logged, leaving the host builder to supply its own paths.

pub mod cargo;
pub mod locator;
pub mod probe;
pub mod strategy;

use std::path::PathBuf;

pub use locator::{Discovery, Locator, NOT_FOUND_WARNING};
pub use probe::{Probe, SystemProbe};
pub use strategy::{ProbeSource, Validation};

/// Locate CUDA include directories in the current process environment
pub fn find_cuda_include_dirs() -> Vec<PathBuf> {
    Locator::new().locate(&SystemProbe).include_dirs
}
