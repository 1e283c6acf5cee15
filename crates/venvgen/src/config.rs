//! Configuration file parsing and merging
//!
//! This module handles parsing of `venvgen.toml` and `venvgen.local.toml`
//! files. The local file overrides the base one: tables merge recursively,
//! arrays and primitives are replaced.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

use crate::Result;
use crate::env::{Contributions, DialectKind};

/// Base configuration file name
pub const CONFIG_FILE: &str = "venvgen.toml";

/// Local override file name
pub const LOCAL_CONFIG_FILE: &str = "venvgen.local.toml";

/// Main configuration structure for venvgen
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Virtual environment settings
    pub venv: VenvConfig,

    /// Variable contributions, in document order
    pub env: Contributions,
}

/// Virtual environment configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VenvConfig {
    /// Prompt name (default: the directory's base name)
    pub name: Option<String>,

    /// Script dialect: "posix", "windows" or "auto" (default: "auto")
    pub dialect: String,

    /// Directory the scripts are written to, relative to the target directory
    pub output_dir: Option<Utf8PathBuf>,
}

impl Default for VenvConfig {
    fn default() -> Self {
        Self {
            name: None,
            dialect: "auto".to_string(),
            output_dir: None,
        }
    }
}

impl VenvConfig {
    /// Resolve the configured dialect name
    pub fn dialect_kind(&self) -> Result<DialectKind> {
        self.dialect.parse()
    }
}

impl Config {
    /// Load configuration from a directory.
    ///
    /// This loads `venvgen.toml` and optionally merges `venvgen.local.toml` if it exists.
    pub fn load(dir: &Utf8Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        let local_config_path = dir.join(LOCAL_CONFIG_FILE);

        let base_config = if config_path.exists() {
            tracing::debug!("Loading {}", config_path);
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str::<toml::Value>(&content)?
        } else {
            toml::Value::Table(toml::map::Map::new())
        };

        let local_config = if local_config_path.exists() {
            tracing::debug!("Loading {}", local_config_path);
            let content = std::fs::read_to_string(&local_config_path)?;
            Some(toml::from_str::<toml::Value>(&content)?)
        } else {
            None
        };

        let merged = if let Some(local) = local_config {
            merge_toml_values(base_config, local)
        } else {
            base_config
        };

        let config: Config = merged.try_into()?;

        Ok(config)
    }

    /// Load configuration from a string (for testing)
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Directory the scripts should be written to
    pub fn output_dir(&self, dir: &Utf8Path) -> Utf8PathBuf {
        match &self.venv.output_dir {
            Some(out) => dir.join(out),
            None => dir.to_path_buf(),
        }
    }
}

/// Merge two TOML values:
/// - Tables: recursively merged
/// - Arrays: local replaces base (not merged)
/// - Primitives: local overrides base
fn merge_toml_values(base: toml::Value, local: toml::Value) -> toml::Value {
    match (base, local) {
        (toml::Value::Table(mut base_table), toml::Value::Table(local_table)) => {
            for (key, local_value) in local_table {
                // Merge in place so base keys keep their document position
                if let Some(base_value) = base_table.get_mut(&key) {
                    let taken = std::mem::replace(base_value, toml::Value::Boolean(false));
                    *base_value = merge_toml_values(taken, local_value);
                } else {
                    base_table.insert(key, local_value);
                }
            }
            toml::Value::Table(base_table)
        }
        (_, local) => local,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EnvValue;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.venv.name.is_none());
        assert_eq!(config.venv.dialect, "auto");
        assert_eq!(config.venv.dialect_kind().unwrap(), DialectKind::host());
        assert!(config.env.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let content = r#"
[venv]
name = "dev"
dialect = "windows"
output_dir = "scripts"

[env]
PATH = ["/opt/tool/bin", "/opt/other/bin"]
CFLAGS = "-O2"
"#;

        let config = Config::parse(content).unwrap();

        assert_eq!(config.venv.name.as_deref(), Some("dev"));
        assert_eq!(config.venv.dialect_kind().unwrap(), DialectKind::Windows);
        assert_eq!(
            config.output_dir(Utf8Path::new("/proj")),
            Utf8PathBuf::from("/proj/scripts")
        );

        let entries: Vec<_> = config.env.iter().collect();
        assert_eq!(
            entries,
            vec![
                ("PATH", &EnvValue::list(["/opt/tool/bin", "/opt/other/bin"])),
                ("CFLAGS", &EnvValue::from("-O2")),
            ]
        );
    }

    #[test]
    fn test_invalid_dialect() {
        let config = Config::parse("[venv]\ndialect = \"fish\"\n").unwrap();
        assert!(config.venv.dialect_kind().is_err());
    }

    #[test]
    fn test_load_from_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(temp_dir.path()).unwrap();

        let config_content = r#"
[venv]
dialect = "posix"

[env]
PATH = ["/base/bin"]
CC = "gcc"
"#;
        std::fs::write(dir.join(CONFIG_FILE), config_content).unwrap();

        let local_content = r#"
[env]
PATH = ["/local/bin"]
"#;
        std::fs::write(dir.join(LOCAL_CONFIG_FILE), local_content).unwrap();

        let config = Config::load(dir).unwrap();

        assert_eq!(config.venv.dialect_kind().unwrap(), DialectKind::Posix);
        let entries: Vec<_> = config.env.iter().collect();
        // Arrays are replaced, untouched keys are kept in place
        assert_eq!(
            entries,
            vec![
                ("PATH", &EnvValue::list(["/local/bin"])),
                ("CC", &EnvValue::from("gcc")),
            ]
        );
        assert_eq!(config.output_dir(dir), dir.to_path_buf());
    }

    #[test]
    fn test_load_missing_config_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = Utf8Path::from_path(temp_dir.path()).unwrap();

        let config = Config::load(dir).unwrap();

        assert_eq!(config.venv.dialect, "auto");
        assert!(config.env.is_empty());
    }
}
