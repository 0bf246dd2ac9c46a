//! Shared types and utilities for TCGS
//!
//! This crate contains the data model passed between CUDA discovery, the
//! extension descriptor, the profiler and the command-line front end.

pub mod types;
pub mod utils;

// Re-export commonly used types
pub use types::{color::*, extension::*};
