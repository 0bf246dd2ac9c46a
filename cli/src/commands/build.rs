//! Build command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tcgs_cuda::Locator;
use tcgs_extension::{assemble, build_all, host_builder, BuildError, BuildOptions};
use tcgs_profiler::{mark_phase, Color};
use tracing::info;

use super::SourceArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory for compiled objects and libraries
    #[arg(short, long, default_value = "build")]
    pub out_dir: PathBuf,

    /// Target triple to compile for
    #[arg(long, env = "TARGET")]
    pub target: Option<String>,

    /// Optimization level
    #[arg(long, default_value = "3")]
    pub opt_level: u32,
}

pub fn run(args: BuildArgs) -> Result<()> {
    let config = args.source.load_config()?;
    let options = BuildOptions {
        out_dir: Some(args.out_dir.clone()),
        target: args.target.clone(),
        opt_level: args.opt_level,
        cargo_metadata: false,
    };
    let builder = host_builder(&options).ok_or(BuildError::NoHostBuilder)?;

    let discovery = super::discover_cuda(&Locator::new().with_validation(config.validation));
    let manifest = assemble(&config, &discovery, Some(builder.as_ref()));

    info!(
        "Compiling {} extension(s) from {}",
        manifest.ext_modules.len(),
        config.source_root.display()
    );
    let built = mark_phase("build_extensions", Color::Green, || {
        build_all(&manifest.ext_modules, &config.source_root, builder.as_ref())
    })
    .context("Extension build failed")?;

    for ext in built {
        output::success(&format!("Built {} -> {}", ext.module, ext.libraries.join(", ")));
    }
    output::info(&format!("Output in {}", args.out_dir.display()));
    Ok(())
}
