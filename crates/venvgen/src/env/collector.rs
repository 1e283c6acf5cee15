//! Variable name normalization and classification

use std::borrow::Cow;
use std::collections::BTreeMap;

use super::dialect::ShellDialect;
use super::value::{Contributions, EnvValue};

/// Names canonicalized case-insensitively to the spelling given here
const CANONICAL_NAMES: &[&str] = &["PATH"];

/// Multi-valued names whose entries may contain spaces on POSIX shells
const QUOTED_LIST_NAMES: &[&str] = &["PATH", "PYTHONPATH"];

/// Contributions split into multi-valued and single-valued variables,
/// keyed by normalized name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedVariables {
    /// List entries, in contribution order, quoted as needed and joined with
    /// the dialect's separator
    pub multi: BTreeMap<String, String>,
    pub single: BTreeMap<String, String>,
}

impl ClassifiedVariables {
    /// Every touched name: multi-valued first, then single-valued, each sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.multi
            .keys()
            .chain(self.single.keys())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.multi.len() + self.single.len()
    }

    pub fn is_empty(&self) -> bool {
        self.multi.is_empty() && self.single.is_empty()
    }

    fn remove(&mut self, name: &str) -> bool {
        self.multi.remove(name).is_some() | self.single.remove(name).is_some()
    }
}

/// Canonicalize well-known names; every other name is returned unchanged
pub fn normalize_name(name: &str) -> Cow<'_, str> {
    CANONICAL_NAMES
        .iter()
        .find(|canonical| canonical.eq_ignore_ascii_case(name))
        .map_or(Cow::Borrowed(name), |canonical| Cow::Borrowed(*canonical))
}

/// Normalize and classify contributions for the given dialect.
///
/// The last contribution for a normalized name wins. Empty lists contribute
/// nothing and are dropped.
pub fn collect(contributions: &Contributions, dialect: &dyn ShellDialect) -> ClassifiedVariables {
    let mut classified = ClassifiedVariables::default();

    for (raw_name, value) in contributions.iter() {
        let name = normalize_name(raw_name).into_owned();
        if name != raw_name {
            tracing::debug!(from = raw_name, to = %name, "Normalized variable name");
        }
        if classified.remove(&name) {
            tracing::warn!(variable = %name, "Duplicate contribution, keeping the last one");
        }

        match value {
            EnvValue::List(entries) if entries.is_empty() => {
                tracing::debug!(variable = %name, "Dropping empty list contribution");
            }
            EnvValue::List(entries) => {
                let joined = join_entries(&name, entries, dialect);
                classified.multi.insert(name, joined);
            }
            EnvValue::Scalar(value) => {
                classified.single.insert(name, value.clone());
            }
        }
    }

    tracing::debug!(
        multi = classified.multi.len(),
        single = classified.single.len(),
        "Classified contributions"
    );
    classified
}

fn join_entries(name: &str, entries: &[String], dialect: &dyn ShellDialect) -> String {
    let quote = QUOTED_LIST_NAMES.contains(&name);
    entries
        .iter()
        .map(|entry| {
            if quote {
                dialect.quote_if_needed(entry)
            } else {
                Cow::Borrowed(entry.as_str())
            }
        })
        .collect::<Vec<_>>()
        .join(dialect.path_separator())
}
