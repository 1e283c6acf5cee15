//! Error types for venvgen

// This warning is a false positive from thiserror macro expansion
#![allow(unused_assignments)]

use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for venvgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for venvgen
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// A virtual environment is already active in the current shell
    #[error("A virtual environment is already active: {venv_dir}")]
    #[diagnostic(
        code(venvgen::already_active),
        help("Deactivate the current virtual environment (or close the console) with the deactivate script in {venv_dir}, then run venvgen again")
    )]
    EnvironmentAlreadyActive {
        /// Directory recorded by the active environment's sentinel
        venv_dir: Utf8PathBuf,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    #[diagnostic(help("{help}"))]
    Config { message: String, help: String },
}

impl Error {
    /// Create an already-active error for the given sentinel value
    pub fn already_active(venv_dir: impl Into<Utf8PathBuf>) -> Self {
        Self::EnvironmentAlreadyActive {
            venv_dir: venv_dir.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: help.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_active_carries_directory() {
        let err = Error::already_active("/proj/myenv");
        assert!(matches!(
            &err,
            Error::EnvironmentAlreadyActive { venv_dir } if venv_dir == "/proj/myenv"
        ));
        assert!(err.to_string().contains("/proj/myenv"));
    }
}
