//! Manifest command implementation

use anyhow::Result;
use clap::Args;
use tcgs_cuda::Locator;
use tcgs_extension::{assemble, host_builder, BuildOptions};
use tcgs_shared::Toolchain;

use super::SourceArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ManifestArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the manifest as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ManifestArgs) -> Result<()> {
    let config = args.source.load_config()?;
    let discovery = super::discover_cuda(&Locator::new().with_validation(config.validation));
    let builder = host_builder(&BuildOptions::default());
    let manifest = assemble(&config, &discovery, builder.as_deref());

    if args.json {
        println!("{}", manifest.to_json_pretty()?);
        return Ok(());
    }

    output::info(&format!(
        "Package {} (packages: {})",
        manifest.name,
        manifest.packages.join(", ")
    ));

    if !manifest.has_extensions() {
        output::warning("No host builder compiled in; metadata only");
        return Ok(());
    }

    for ext in &manifest.ext_modules {
        output::success(&format!("Extension {}", ext.name));
        for source in &ext.sources {
            output::item(&format!("source  {}", source.display()));
        }
        for dir in &ext.include_dirs {
            output::item(&format!("include {}", dir.display()));
        }
        for toolchain in [Toolchain::Nvcc, Toolchain::Cxx] {
            output::item(&format!(
                "{:<7} {}",
                format!("{:?}", toolchain).to_lowercase(),
                ext.flags(toolchain).join(" ")
            ));
        }
    }
    for (command, builder) in &manifest.build_commands {
        output::item(&format!("command {} -> {}", command, builder));
    }
    Ok(())
}
