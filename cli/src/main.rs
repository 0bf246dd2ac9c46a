//! CLI for TCGS
//!
//! Commands:
//! - locate: find the CUDA include directory
//! - manifest: print the extension/package descriptor
//! - build: compile the rasterizer extension
//! - profiler: report the detected profiling backend

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "tcgs")]
#[command(about = "TCGS - CUDA discovery, extension builds and profiling spans", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Locate the CUDA include directory
    Locate(commands::locate::LocateArgs),

    /// Print the package manifest handed to the host builder
    Manifest(commands::manifest::ManifestArgs),

    /// Compile the native extension
    Build(commands::build::BuildArgs),

    /// Show which profiling backend is active
    Profiler,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Installed before any profiler is detected so `tracing` regions count
    // as an available backend.
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Locate(args) => commands::locate::run(args),
        Commands::Manifest(args) => commands::manifest::run(args),
        Commands::Build(args) => commands::build::run(args),
        Commands::Profiler => commands::profiler::run(),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_locate_flags() {
        let cli = Cli::parse_from(["tcgs", "locate", "--existence-only", "--json"]);
        match cli.command {
            Commands::Locate(args) => {
                assert!(args.existence_only);
                assert!(args.json);
            }
            _ => panic!("expected locate"),
        }
    }

    #[test]
    fn test_locate_json_conflicts_with_cargo() {
        assert!(Cli::try_parse_from(["tcgs", "locate", "--json", "--cargo"]).is_err());
    }

    #[test]
    fn test_parse_build_defaults() {
        let cli = Cli::parse_from(["tcgs", "-v", "build", "--source-root", "/src/rasterizer"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.out_dir, std::path::PathBuf::from("build"));
                assert_eq!(args.opt_level, 3);
                assert_eq!(
                    args.source.source_root,
                    Some(std::path::PathBuf::from("/src/rasterizer"))
                );
            }
            _ => panic!("expected build"),
        }
    }
}
