//! Show command implementation
//!
//! Prints one generated script to stdout without writing anything.

use camino::Utf8Path;
use clap::{Args, ValueEnum};
use miette::Result;

use crate::env::EnvironmentSnapshot;

use super::{SourceArgs, prepare};

/// Which script to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScriptKind {
    Activate,
    Deactivate,
}

/// Arguments for the show command
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Script to print
    #[arg(value_enum)]
    pub script: ScriptKind,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Run the show command
pub fn run(dir: &Utf8Path, args: ShowArgs) -> Result<()> {
    let prepared = prepare(dir, &args.source)?;
    let snapshot = EnvironmentSnapshot::from_current_env();
    let scripts = prepared
        .generator
        .generate(&prepared.contributions, &snapshot)?;

    let text = match args.script {
        ScriptKind::Activate => scripts.activate_text(),
        ScriptKind::Deactivate => scripts.deactivate_text(),
    };
    print!("{}", text);

    Ok(())
}
