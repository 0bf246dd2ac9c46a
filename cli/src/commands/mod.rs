//! Subcommand implementations

pub mod build;
pub mod locate;
pub mod manifest;
pub mod profiler;

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tcgs_cuda::{Discovery, Locator, SystemProbe};
use tcgs_extension::BuildConfig;
use tcgs_profiler::{mark_phase, Color};

/// Where the build configuration and sources live
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Configuration file (defaults to ./tcgs.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Rasterizer source root (overrides the configuration)
    #[arg(short, long)]
    pub source_root: Option<PathBuf>,
}

impl SourceArgs {
    pub fn load_config(&self) -> Result<BuildConfig> {
        let mut config =
            BuildConfig::load(self.config.as_deref()).context("Failed to load build configuration")?;
        if let Some(root) = &self.source_root {
            config.source_root = root.clone();
        }
        Ok(config)
    }
}

/// Run CUDA discovery inside a profiling span
pub fn discover_cuda(locator: &Locator) -> Discovery {
    mark_phase("locate_cuda", Color::Cyan, || locator.locate(&SystemProbe))
}
