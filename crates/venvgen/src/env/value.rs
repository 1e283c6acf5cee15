//! Variable contribution types

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Value contributed for a single environment variable
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    /// Plain value that overwrites the variable
    Scalar(String),
    /// Ordered path-like entries prepended to the variable
    List(Vec<String>),
}

impl EnvValue {
    /// Build a list value from any iterator of entries
    pub fn list<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EnvValue::List(entries.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for EnvValue {
    fn from(s: &str) -> Self {
        EnvValue::Scalar(s.to_string())
    }
}

impl From<String> for EnvValue {
    fn from(s: String) -> Self {
        EnvValue::Scalar(s)
    }
}

impl From<Vec<String>> for EnvValue {
    fn from(v: Vec<String>) -> Self {
        EnvValue::List(v)
    }
}

/// Environment contributions in the order they were supplied.
///
/// Names are kept exactly as given; duplicates are allowed here and are
/// resolved during collection, where the last one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contributions {
    entries: Vec<(String, EnvValue)>,
}

impl Contributions {
    /// Create an empty set of contributions
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contribution after all existing ones
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<EnvValue>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Append every contribution from `other`, keeping its order
    pub fn extend(&mut self, other: Contributions) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnvValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for Contributions
where
    N: Into<String>,
    V: Into<EnvValue>,
{
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut contributions = Self::new();
        for (name, value) in iter {
            contributions.push(name, value);
        }
        contributions
    }
}

impl<'de> Deserialize<'de> for Contributions {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ContributionsVisitor;

        impl<'de> Visitor<'de> for ContributionsVisitor {
            type Value = Contributions;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of variable names to strings or arrays of strings")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut contributions = Contributions::new();
                while let Some((name, value)) = map.next_entry::<String, EnvValue>()? {
                    contributions.push(name, value);
                }
                Ok(contributions)
            }
        }

        deserializer.deserialize_map(ContributionsVisitor)
    }
}
