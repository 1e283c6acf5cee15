//! Virtual environment script generation
//!
//! [`VirtualEnvGenerator`] is the single entry point: it checks the snapshot
//! for an already active environment, classifies the contributions and
//! composes both scripts for one dialect.

use crate::env::{
    Contributions, DialectKind, EnvironmentSnapshot, GeneratedScripts, SENTINEL_VAR,
    ScriptComposer, VenvContext, collect,
};
use crate::{Error, Result};

/// Generator for a single activate/deactivate pair
#[derive(Debug, Clone)]
pub struct VirtualEnvGenerator {
    context: VenvContext,
    dialect: DialectKind,
}

impl VirtualEnvGenerator {
    /// Create a generator for the given environment and dialect
    pub fn new(context: VenvContext, dialect: DialectKind) -> Self {
        Self { context, dialect }
    }

    pub fn context(&self) -> &VenvContext {
        &self.context
    }

    pub fn dialect(&self) -> DialectKind {
        self.dialect
    }

    /// Generate both scripts.
    ///
    /// Fails with [`Error::EnvironmentAlreadyActive`] when the snapshot shows
    /// another environment is active; nothing is produced in that case.
    pub fn generate(
        &self,
        contributions: &Contributions,
        snapshot: &EnvironmentSnapshot,
    ) -> Result<GeneratedScripts> {
        if let Some(active) = snapshot.non_empty(SENTINEL_VAR) {
            return Err(Error::already_active(active));
        }

        let adapter = self.dialect.adapter();
        let variables = collect(contributions, adapter);
        tracing::debug!(
            dialect = %self.dialect,
            venv = %self.context.name,
            variables = variables.len(),
            "Composing scripts"
        );

        Ok(ScriptComposer::new(adapter).compose(&variables, snapshot, &self.context))
    }
}
