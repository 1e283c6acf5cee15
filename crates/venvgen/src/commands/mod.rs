//! CLI command implementations

pub mod generate;
pub mod show;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use miette::{IntoDiagnostic, Result};

use crate::config::Config;
use crate::env::{Contributions, DialectKind, EnvValue, VenvContext};
use crate::generator::VirtualEnvGenerator;

/// Arguments shared by every command that runs the generator
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Script dialect (posix, windows, auto); overrides the config file
    #[arg(long)]
    pub dialect: Option<String>,

    /// Scalar contribution, applied after the config file
    #[arg(long = "env", value_name = "NAME=VALUE", value_parser = parse_scalar)]
    pub scalars: Vec<(String, String)>,

    /// List contribution with comma-separated entries, applied after the config file
    #[arg(long = "list-env", value_name = "NAME=A,B,...", value_parser = parse_list)]
    pub lists: Vec<(String, Vec<String>)>,
}

/// Everything needed for one generation run
#[derive(Debug)]
pub struct Prepared {
    pub generator: VirtualEnvGenerator,
    pub contributions: Contributions,
    pub output_dir: Utf8PathBuf,
}

/// Load configuration for `dir` and combine it with command-line arguments
pub fn prepare(dir: &Utf8Path, args: &SourceArgs) -> Result<Prepared> {
    let config = Config::load(dir)?;

    let dialect: DialectKind = match &args.dialect {
        Some(name) => name.parse::<DialectKind>()?,
        None => config.venv.dialect_kind()?,
    };

    let output_dir = absolute(&config.output_dir(dir))?;
    let target_dir = absolute(dir)?;
    let name = config
        .venv
        .name
        .clone()
        .unwrap_or_else(|| VenvContext::from_dir(&target_dir).name);

    let mut contributions = config.env;
    contributions.extend(args.contributions());

    Ok(Prepared {
        generator: VirtualEnvGenerator::new(VenvContext::new(name, output_dir.clone()), dialect),
        contributions,
        output_dir,
    })
}

impl SourceArgs {
    /// Command-line contributions: scalars first, then lists
    pub fn contributions(&self) -> Contributions {
        let mut contributions = Contributions::new();
        for (name, value) in &self.scalars {
            contributions.push(name.clone(), EnvValue::Scalar(value.clone()));
        }
        for (name, entries) in &self.lists {
            contributions.push(name.clone(), EnvValue::List(entries.clone()));
        }
        contributions
    }
}

fn absolute(path: &Utf8Path) -> Result<Utf8PathBuf> {
    if path.exists() {
        path.canonicalize_utf8().into_diagnostic()
    } else {
        let cwd = std::env::current_dir().into_diagnostic()?;
        let cwd = Utf8PathBuf::try_from(cwd).into_diagnostic()?;
        Ok(cwd.join(path))
    }
}

fn parse_scalar(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", s)),
    }
}

fn parse_list(s: &str) -> std::result::Result<(String, Vec<String>), String> {
    let (name, value) = parse_scalar(s)?;
    let entries = value
        .split(',')
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect();
    Ok((name, entries))
}
