//! Activate and deactivate script composition

use camino::{Utf8Path, Utf8PathBuf};

use super::collector::ClassifiedVariables;
use super::dialect::{DialectKind, ShellDialect};
use super::snapshot::EnvironmentSnapshot;

/// Variable whose presence marks an active virtual environment
pub const SENTINEL_VAR: &str = "_VENV_SENTINEL";

/// Identity of the environment being generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenvContext {
    /// Name shown in the prompt
    pub name: String,
    /// Absolute directory of the environment, recorded in the sentinel
    pub dir: Utf8PathBuf,
}

impl VenvContext {
    pub fn new(name: impl Into<String>, dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
        }
    }

    /// Context named after the base name of `dir`
    pub fn from_dir(dir: &Utf8Path) -> Self {
        let name = dir.file_name().unwrap_or(dir.as_str());
        Self::new(name, dir)
    }
}

/// Statements of a generated activate/deactivate pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedScripts {
    pub activate: Vec<String>,
    pub deactivate: Vec<String>,
    extension: &'static str,
    line_terminator: &'static str,
}

impl GeneratedScripts {
    /// File name of the activate script, e.g. `activate.sh`
    pub fn activate_file_name(&self) -> String {
        format!("activate.{}", self.extension)
    }

    /// File name of the deactivate script, e.g. `deactivate.sh`
    pub fn deactivate_file_name(&self) -> String {
        format!("deactivate.{}", self.extension)
    }

    pub fn activate_text(&self) -> String {
        self.render(&self.activate)
    }

    pub fn deactivate_text(&self) -> String {
        self.render(&self.deactivate)
    }

    /// Both scripts as `(file name, content)` pairs, activate first
    pub fn files(&self) -> [(String, String); 2] {
        [
            (self.activate_file_name(), self.activate_text()),
            (self.deactivate_file_name(), self.deactivate_text()),
        ]
    }

    fn render(&self, lines: &[String]) -> String {
        let mut text = lines.join(self.line_terminator);
        text.push_str(self.line_terminator);
        text
    }
}

/// Builds both scripts from classified variables and a snapshot.
///
/// Multi-valued variables are prepended to their own value at the time the
/// activate script runs, while deactivation restores the values captured in
/// the snapshot. Scripts regenerated while nested shells are open rely on
/// this.
#[derive(Debug, Clone, Copy)]
pub struct ScriptComposer<'a> {
    dialect: &'a dyn ShellDialect,
}

impl<'a> ScriptComposer<'a> {
    pub fn new(dialect: &'a dyn ShellDialect) -> Self {
        Self { dialect }
    }

    pub fn compose(
        &self,
        variables: &ClassifiedVariables,
        snapshot: &EnvironmentSnapshot,
        context: &VenvContext,
    ) -> GeneratedScripts {
        GeneratedScripts {
            activate: self.activate_lines(variables, context),
            deactivate: self.deactivate_lines(variables, snapshot),
            extension: self.dialect.file_extension(),
            line_terminator: self.dialect.line_terminator(),
        }
    }

    fn activate_lines(&self, variables: &ClassifiedVariables, context: &VenvContext) -> Vec<String> {
        let d = self.dialect;
        let prompt = d.prompt_variable();
        let saved_prompt = saved_prompt_variable(prompt);

        let mut lines = d.header_lines();
        lines.extend(d.guard_lines(SENTINEL_VAR));
        lines.push(self.quoted_assignment(&saved_prompt, &d.self_reference(prompt)));
        lines.push(self.quoted_assignment(
            prompt,
            &format!(
                "({}) {}",
                d.escape_prompt_text(&context.name),
                d.self_reference(prompt)
            ),
        ));
        lines.push(d.literal_assignment(SENTINEL_VAR, context.dir.as_str()));

        for (name, joined) in &variables.multi {
            let value = format!(
                "{}{}{}",
                joined,
                d.path_separator(),
                d.self_reference(name)
            );
            lines.push(d.assignment(name, &value));
        }
        for (name, value) in &variables.single {
            lines.push(d.assignment(name, value));
        }
        lines
    }

    fn deactivate_lines(
        &self,
        variables: &ClassifiedVariables,
        snapshot: &EnvironmentSnapshot,
    ) -> Vec<String> {
        let d = self.dialect;
        let prompt = d.prompt_variable();
        let saved_prompt = saved_prompt_variable(prompt);

        let mut lines = d.header_lines();
        for name in variables.names() {
            let restore = match snapshot.get_for(d.kind(), name) {
                Some(old_value) => d.literal_assignment(name, old_value),
                None => d.clear(name),
            };
            lines.push(restore);
        }
        lines.push(self.quoted_assignment(prompt, &d.self_reference(&saved_prompt)));
        lines.push(d.clear(&saved_prompt));
        lines.push(d.clear(SENTINEL_VAR));
        lines
    }

    /// Assignment whose value may expand references but must stay one word
    fn quoted_assignment(&self, name: &str, value: &str) -> String {
        match self.dialect.kind() {
            DialectKind::Posix => self.dialect.assignment(name, &format!("\"{}\"", value)),
            DialectKind::Windows => self.dialect.assignment(name, value),
        }
    }
}

fn saved_prompt_variable(prompt: &str) -> String {
    format!("_OLD_VENV_{}", prompt)
}
