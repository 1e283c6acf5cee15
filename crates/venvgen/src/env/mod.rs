//! Environment variable collection and script composition
//!
//! Contributions flow through three stages:
//! - [`collect`] normalizes names and splits values into lists and scalars
//! - [`ScriptComposer`] turns the classified set and a snapshot into statements
//! - a [`ShellDialect`] supplies the syntax for each statement

mod collector;
mod composer;
mod dialect;
mod snapshot;
mod value;

pub use collector::{ClassifiedVariables, collect, normalize_name};
pub use composer::{GeneratedScripts, SENTINEL_VAR, ScriptComposer, VenvContext};
pub use dialect::{DialectKind, Posix, ShellDialect, Windows, shell_escape};
pub use snapshot::EnvironmentSnapshot;
pub use value::{Contributions, EnvValue};
