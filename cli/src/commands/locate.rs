//! Locate command implementation

use anyhow::Result;
use clap::Args;
use tcgs_cuda::cargo::emit_cargo_directives;
use tcgs_cuda::{Locator, Validation};

use crate::output;

#[derive(Args, Debug)]
pub struct LocateArgs {
    /// Accept any existing directory instead of requiring CUDA headers
    #[arg(long)]
    pub existence_only: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Print cargo build-script directives
    #[arg(long, conflicts_with = "json")]
    pub cargo: bool,
}

pub fn run(args: LocateArgs) -> Result<()> {
    let validation = if args.existence_only {
        Validation::Exists
    } else {
        Validation::Headers
    };
    let discovery = super::discover_cuda(&Locator::new().with_validation(validation));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&discovery)?);
        return Ok(());
    }

    if args.cargo {
        emit_cargo_directives(&discovery);
        return Ok(());
    }

    match (&discovery.source, discovery.include_dirs.first()) {
        (Some(source), Some(dir)) => {
            output::success(&format!("{} (via {})", dir.display(), source))
        }
        _ => output::info("No CUDA include directory; the host builder must supply its own"),
    }
    Ok(())
}
