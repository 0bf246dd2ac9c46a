//! Data model shared across crates

pub mod color;
pub mod extension;
