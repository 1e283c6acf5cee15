//! Shell dialects and their syntax primitives

use std::borrow::Cow;

use crate::{Error, Result};

/// Platform family a pair of scripts is generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectKind {
    /// POSIX-compatible shells (sh, bash, zsh)
    Posix,
    /// Windows `cmd.exe` batch files
    Windows,
}

impl DialectKind {
    /// Dialect of the platform this binary was built for
    pub fn host() -> Self {
        if cfg!(windows) {
            DialectKind::Windows
        } else {
            DialectKind::Posix
        }
    }

    /// Syntax adapter for this dialect
    pub fn adapter(self) -> &'static dyn ShellDialect {
        match self {
            DialectKind::Posix => &Posix,
            DialectKind::Windows => &Windows,
        }
    }
}

impl std::str::FromStr for DialectKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "posix" | "sh" | "bash" | "zsh" => Ok(DialectKind::Posix),
            "windows" | "bat" | "cmd" => Ok(DialectKind::Windows),
            "auto" => Ok(DialectKind::host()),
            _ => Err(Error::config(
                format!("Unknown dialect: {}", s),
                "Supported dialects: posix, windows, auto",
            )),
        }
    }
}

impl std::fmt::Display for DialectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DialectKind::Posix => write!(f, "posix"),
            DialectKind::Windows => write!(f, "windows"),
        }
    }
}

/// Syntax primitives the script composer builds statements from.
///
/// Implementations hold no state; every method is a pure function of its
/// arguments.
pub trait ShellDialect: std::fmt::Debug + Sync {
    fn kind(&self) -> DialectKind;

    /// Statement setting `name` to `value`, with `value` emitted as given
    fn assignment(&self, name: &str, value: &str) -> String;

    /// Statement setting `name` to `value`, quoted so it is restored verbatim
    fn literal_assignment(&self, name: &str, value: &str) -> String;

    /// Statement removing `name` from the environment
    fn clear(&self, name: &str) -> String;

    /// Separator between entries of a multi-valued variable
    fn path_separator(&self) -> &'static str;

    /// Quote a single list entry if this dialect needs it
    fn quote_if_needed<'a>(&self, entry: &'a str) -> Cow<'a, str>;

    /// Lines every script starts with
    fn header_lines(&self) -> Vec<String>;

    /// Extension of the generated files, without the dot
    fn file_extension(&self) -> &'static str;

    fn line_terminator(&self) -> &'static str;

    /// Reference to the current value of `name` inside an assignment
    fn self_reference(&self, name: &str) -> String;

    /// Variable holding the interactive prompt
    fn prompt_variable(&self) -> &'static str;

    /// Escape literal text placed inside the prompt assignment
    fn escape_prompt_text<'a>(&self, text: &'a str) -> Cow<'a, str>;

    /// Statements that warn and stop when `sentinel` is already set
    fn guard_lines(&self, sentinel: &str) -> Vec<String>;
}

/// POSIX-compatible shells
#[derive(Debug, Clone, Copy, Default)]
pub struct Posix;

/// Windows batch files
#[derive(Debug, Clone, Copy, Default)]
pub struct Windows;

impl ShellDialect for Posix {
    fn kind(&self) -> DialectKind {
        DialectKind::Posix
    }

    fn assignment(&self, name: &str, value: &str) -> String {
        format!("export {}={}", name, value)
    }

    fn literal_assignment(&self, name: &str, value: &str) -> String {
        if is_shell_safe(value) {
            self.assignment(name, value)
        } else {
            self.assignment(name, &shell_escape(value))
        }
    }

    fn clear(&self, name: &str) -> String {
        format!("unset {}", name)
    }

    fn path_separator(&self) -> &'static str {
        ":"
    }

    fn quote_if_needed<'a>(&self, entry: &'a str) -> Cow<'a, str> {
        if entry.chars().any(char::is_whitespace) {
            Cow::Owned(format!("\"{}\"", entry))
        } else {
            Cow::Borrowed(entry)
        }
    }

    fn header_lines(&self) -> Vec<String> {
        Vec::new()
    }

    fn file_extension(&self) -> &'static str {
        "sh"
    }

    fn line_terminator(&self) -> &'static str {
        "\n"
    }

    fn self_reference(&self, name: &str) -> String {
        format!("${}", name)
    }

    fn prompt_variable(&self) -> &'static str {
        "PS1"
    }

    // The prompt value sits inside double quotes
    fn escape_prompt_text<'a>(&self, text: &'a str) -> Cow<'a, str> {
        escape_chars(text, &['\\', '"', '$', '`'], '\\')
    }

    fn guard_lines(&self, sentinel: &str) -> Vec<String> {
        vec![
            format!(
                "if [ -n \"${s}\" ]; then echo \"Deactivate current venv first with 'source ${s}/deactivate.sh'\"; fi",
                s = sentinel
            ),
            format!(
                "if [ -n \"${}\" ]; then return 1 2>/dev/null || exit 1; fi",
                sentinel
            ),
        ]
    }
}

impl ShellDialect for Windows {
    fn kind(&self) -> DialectKind {
        DialectKind::Windows
    }

    fn assignment(&self, name: &str, value: &str) -> String {
        format!("SET \"{}={}\"", name, value)
    }

    // The quoted SET form already keeps spaces and special characters intact.
    fn literal_assignment(&self, name: &str, value: &str) -> String {
        self.assignment(name, value)
    }

    fn clear(&self, name: &str) -> String {
        self.assignment(name, "")
    }

    fn path_separator(&self) -> &'static str {
        ";"
    }

    fn quote_if_needed<'a>(&self, entry: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(entry)
    }

    fn header_lines(&self) -> Vec<String> {
        vec!["@echo off".to_string()]
    }

    fn file_extension(&self) -> &'static str {
        "bat"
    }

    fn line_terminator(&self) -> &'static str {
        "\r\n"
    }

    fn self_reference(&self, name: &str) -> String {
        format!("%{}%", name)
    }

    fn prompt_variable(&self) -> &'static str {
        "PROMPT"
    }

    // `%` would expand in a batch file and `$` starts a PROMPT code; both are
    // escaped by doubling.
    fn escape_prompt_text<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if text.contains(&['%', '$'][..]) {
            Cow::Owned(text.replace('%', "%%").replace('$', "$$"))
        } else {
            Cow::Borrowed(text)
        }
    }

    fn guard_lines(&self, sentinel: &str) -> Vec<String> {
        vec![
            format!(
                "if defined {s} echo Deactivate current venv first with \"%{s}%\\deactivate.bat\"",
                s = sentinel
            ),
            format!("if defined {} (EXIT /B)", sentinel),
        ]
    }
}

/// Prefix every occurrence of a `special` character in `s` with `escape`
fn escape_chars<'a>(s: &'a str, special: &[char], escape: char) -> Cow<'a, str> {
    if !s.contains(special) {
        return Cow::Borrowed(s);
    }
    let mut escaped = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if special.contains(&c) {
            escaped.push(escape);
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

/// Whether `s` can appear unquoted on the right side of a POSIX assignment
fn is_shell_safe(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || "/._-+:,=@%".contains(c))
}

/// Escape a string for shell use
pub fn shell_escape(s: &str) -> String {
    // Use single quotes and escape any single quotes in the string
    format!("'{}'", s.replace('\'', "'\\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_escape() {
        assert_eq!(shell_escape("simple"), "'simple'");
        assert_eq!(shell_escape("with space"), "'with space'");
        assert_eq!(shell_escape("it's quoted"), "'it'\\''s quoted'");
    }

    #[test]
    fn test_parse_dialect_kind() {
        assert_eq!("posix".parse::<DialectKind>().unwrap(), DialectKind::Posix);
        assert_eq!("Bash".parse::<DialectKind>().unwrap(), DialectKind::Posix);
        assert_eq!("WINDOWS".parse::<DialectKind>().unwrap(), DialectKind::Windows);
        assert_eq!("auto".parse::<DialectKind>().unwrap(), DialectKind::host());
        assert!(matches!(
            "fish".parse::<DialectKind>(),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_assignment_syntax() {
        assert_eq!(Posix.assignment("CFLAGS", "-O2"), "export CFLAGS=-O2");
        assert_eq!(Windows.assignment("CFLAGS", "-O2"), "SET \"CFLAGS=-O2\"");
    }

    #[test]
    fn test_literal_assignment_quotes_unsafe_values() {
        assert_eq!(
            Posix.literal_assignment("PATH", "/usr/bin:/bin"),
            "export PATH=/usr/bin:/bin"
        );
        assert_eq!(
            Posix.literal_assignment("CFLAGS", "-O2 -g"),
            "export CFLAGS='-O2 -g'"
        );
        assert_eq!(Posix.literal_assignment("EMPTY", ""), "export EMPTY=");
        assert_eq!(
            Windows.literal_assignment("CFLAGS", "-O2 -g"),
            "SET \"CFLAGS=-O2 -g\""
        );
    }

    #[test]
    fn test_clear_syntax() {
        assert_eq!(Posix.clear("CFLAGS"), "unset CFLAGS");
        assert_eq!(Windows.clear("CFLAGS"), "SET \"CFLAGS=\"");
    }

    #[test]
    fn test_quote_if_needed() {
        assert_eq!(Posix.quote_if_needed("/opt/my lib"), "\"/opt/my lib\"");
        assert_eq!(Posix.quote_if_needed("/usr/bin"), "/usr/bin");
        assert_eq!(Windows.quote_if_needed("C:\\my lib"), "C:\\my lib");
    }

    #[test]
    fn test_escape_prompt_text() {
        assert_eq!(Posix.escape_prompt_text("myenv"), "myenv");
        assert_eq!(
            Posix.escape_prompt_text("a\"b$c`d\\e"),
            "a\\\"b\\$c\\`d\\\\e"
        );
        assert_eq!(Windows.escape_prompt_text("myenv"), "myenv");
        assert_eq!(Windows.escape_prompt_text("50%$off"), "50%%$$off");
    }

    #[test]
    fn test_windows_guard_quotes_sentinel_path() {
        let lines = Windows.guard_lines("_S");
        assert_eq!(
            lines[0],
            "if defined _S echo Deactivate current venv first with \"%_S%\\deactivate.bat\""
        );
        assert!(!lines[0].contains('('));
    }

    #[test]
    fn test_self_reference_and_separators() {
        assert_eq!(Posix.self_reference("PATH"), "$PATH");
        assert_eq!(Windows.self_reference("PATH"), "%PATH%");
        assert_eq!(Posix.path_separator(), ":");
        assert_eq!(Windows.path_separator(), ";");
        assert_eq!(Posix.file_extension(), "sh");
        assert_eq!(Windows.file_extension(), "bat");
    }

    #[test]
    fn test_adapter_matches_kind() {
        assert_eq!(DialectKind::Posix.adapter().kind(), DialectKind::Posix);
        assert_eq!(DialectKind::Windows.adapter().kind(), DialectKind::Windows);
    }
}
