//! venvgen - virtual environment script generator
//!
//! This crate turns environment-variable contributions into a matching pair
//! of shell scripts, including:
//! - Name normalization and classification of scalar and list contributions
//! - Activate scripts that prepend lists and overwrite scalars
//! - Deactivate scripts that restore the environment captured at generation time
//! - POSIX shell and Windows batch dialects
//! - Configuration file loading and merging

pub mod commands;
pub mod config;
pub mod env;
pub mod error;
pub mod generator;

pub use error::{Error, Result};
pub use generator::VirtualEnvGenerator;
