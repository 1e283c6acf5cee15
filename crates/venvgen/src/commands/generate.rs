//! Generate command implementation
//!
//! Writes `activate.<ext>` and `deactivate.<ext>` into the output directory.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use miette::Result;

use crate::env::{EnvironmentSnapshot, GeneratedScripts};

use super::{SourceArgs, prepare};

/// Arguments for the generate command
#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Dry run - print the file names that would be written
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the generate command
pub fn run(dir: &Utf8Path, args: GenerateArgs) -> Result<()> {
    let prepared = prepare(dir, &args.source)?;
    let snapshot = EnvironmentSnapshot::from_current_env();

    let scripts = prepared
        .generator
        .generate(&prepared.contributions, &snapshot)?;

    if args.dry_run {
        for (file_name, _) in scripts.files() {
            println!("{}", prepared.output_dir.join(file_name));
        }
        return Ok(());
    }

    let written = write_scripts(&prepared.output_dir, &scripts)?;
    for path in &written {
        tracing::info!("Wrote {}", path);
    }
    tracing::info!(
        "Activate with: {}",
        activation_hint(&prepared.output_dir, &scripts)
    );

    Ok(())
}

/// Write both scripts into `out_dir`, returning the written paths
pub fn write_scripts(
    out_dir: &Utf8Path,
    scripts: &GeneratedScripts,
) -> crate::Result<Vec<Utf8PathBuf>> {
    std::fs::create_dir_all(out_dir)?;

    let mut written = Vec::new();
    for (file_name, content) in scripts.files() {
        let path = out_dir.join(file_name);
        std::fs::write(&path, content)?;
        written.push(path);
    }
    Ok(written)
}

fn activation_hint(out_dir: &Utf8Path, scripts: &GeneratedScripts) -> String {
    let activate = out_dir.join(scripts.activate_file_name());
    if activate.extension() == Some("bat") {
        activate.to_string()
    } else {
        format!("source {}", activate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Contributions, DialectKind, EnvValue, VenvContext};
    use crate::generator::VirtualEnvGenerator;

    #[test]
    fn test_write_scripts() {
        let temp_dir = tempfile::tempdir().unwrap();
        let out_dir = Utf8Path::from_path(temp_dir.path()).unwrap().join("env");

        let contributions: Contributions =
            [("PATH", EnvValue::list(["/usr/a"]))].into_iter().collect();
        let scripts = VirtualEnvGenerator::new(VenvContext::from_dir(&out_dir), DialectKind::Posix)
            .generate(&contributions, &EnvironmentSnapshot::new())
            .unwrap();

        let written = write_scripts(&out_dir, &scripts).unwrap();

        assert_eq!(
            written,
            vec![out_dir.join("activate.sh"), out_dir.join("deactivate.sh")]
        );
        let activate = std::fs::read_to_string(out_dir.join("activate.sh")).unwrap();
        assert_eq!(activate, scripts.activate_text());
        assert!(activate.contains("export PATH=/usr/a:$PATH"));
        assert_eq!(
            activation_hint(&out_dir, &scripts),
            format!("source {}", out_dir.join("activate.sh"))
        );
    }
}
