//! Captured process environment

use std::collections::HashMap;

use super::dialect::DialectKind;

/// Values of the process environment at generation time.
///
/// Captured once and never re-read, so generation stays a pure function of
/// its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSnapshot {
    vars: HashMap<String, String>,
}

impl EnvironmentSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment
    pub fn from_current_env() -> Self {
        // Non-UTF-8 variables cannot appear in generated text, so skip them
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// Build a snapshot from an explicit map
    pub fn with_env(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    /// Get a specific environment variable
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(|s| s.as_str())
    }

    /// Look up `key` the way a shell of `dialect` resolves it.
    ///
    /// Windows variable names are case-insensitive, so `PATH` finds a `Path`
    /// entry there. An exact match always wins; among case variants the
    /// lexicographically smallest name is used.
    pub fn get_for(&self, dialect: DialectKind, key: &str) -> Option<&str> {
        if let Some(value) = self.get(key) {
            return Some(value);
        }
        match dialect {
            DialectKind::Posix => None,
            DialectKind::Windows => self
                .vars
                .iter()
                .filter(|(name, _)| name.eq_ignore_ascii_case(key))
                .min_by(|(a, _), (b, _)| a.cmp(b))
                .map(|(_, value)| value.as_str()),
        }
    }

    /// Value of `key` if it is set to something non-empty
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for EnvironmentSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_distinguishes_empty_from_absent() {
        let snapshot: EnvironmentSnapshot = [("EMPTY", ""), ("SET", "value")].into_iter().collect();

        assert_eq!(snapshot.get("EMPTY"), Some(""));
        assert_eq!(snapshot.get("MISSING"), None);
        assert_eq!(snapshot.non_empty("EMPTY"), None);
        assert_eq!(snapshot.non_empty("SET"), Some("value"));
    }

    #[test]
    fn test_get_for_windows_ignores_case() {
        let snapshot: EnvironmentSnapshot =
            [("Path", "C:\\Windows\\system32"), ("cflags", "/O2")].into_iter().collect();

        assert_eq!(
            snapshot.get_for(DialectKind::Windows, "PATH"),
            Some("C:\\Windows\\system32")
        );
        assert_eq!(snapshot.get_for(DialectKind::Windows, "CFLAGS"), Some("/O2"));
        assert_eq!(snapshot.get_for(DialectKind::Posix, "PATH"), None);
        assert_eq!(snapshot.get_for(DialectKind::Windows, "MISSING"), None);
    }

    #[test]
    fn test_get_for_prefers_exact_match() {
        let snapshot: EnvironmentSnapshot =
            [("Path", "folded"), ("PATH", "exact")].into_iter().collect();

        assert_eq!(snapshot.get_for(DialectKind::Windows, "PATH"), Some("exact"));
        assert_eq!(snapshot.get_for(DialectKind::Windows, "path"), Some("exact"));
    }

    #[test]
    fn test_from_current_env_sees_process_vars() {
        let snapshot = EnvironmentSnapshot::from_current_env();
        if let Ok(path) = std::env::var("PATH") {
            assert_eq!(snapshot.get("PATH"), Some(path.as_str()));
        }
    }
}
