//! venvgen CLI - virtual environment script generator

use clap::{Parser, Subcommand};
use miette::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use venvgen::commands;

/// venvgen - generate activate/deactivate scripts for a virtual environment
#[derive(Debug, Parser)]
#[command(name = "venvgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Virtual environment directory (default: current directory)
    #[arg(short = 'd', long, global = true)]
    dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Write activate and deactivate scripts
    Generate(commands::generate::GenerateArgs),

    /// Print a generated script without writing it
    Show(commands::show::ShowArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Determine the environment directory
    let dir = if let Some(ref path) = cli.dir {
        camino::Utf8PathBuf::from(path)
    } else {
        std::env::current_dir()
            .ok()
            .and_then(|p| camino::Utf8PathBuf::try_from(p).ok())
            .unwrap_or_else(|| camino::Utf8PathBuf::from("."))
    };

    match cli.command {
        Commands::Generate(args) => commands::generate::run(&dir, args),
        Commands::Show(args) => commands::show::run(&dir, args),
    }
}
