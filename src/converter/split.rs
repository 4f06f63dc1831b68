//! Statement splitting over masked SQL.
//!
//! Statements end at `;` or at a `GO` batch-separator line. Because the input
//! is masked, semicolons inside literals and comments are already invisible.

use std::sync::LazyLock;

use regex::Regex;

/// A line holding only `GO`, optionally with a repeat count. The haystack
/// start counts as a line start, so `SELECT 1; GO` splits too.
static BATCH_SEPARATOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*GO(?:[ \t]+\d+)?[ \t]*$\n?").expect("valid regex")
});

/// How a statement unit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator<'a> {
    Semicolon,
    /// The full `GO` line, including its newline.
    Batch(&'a str),
    End
}

/// One statement body and its terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit<'a> {
    pub body:       &'a str,
    pub terminator: Terminator<'a>
}

/// Lazy iterator over statement units.
#[derive(Debug, Clone)]
pub struct Units<'a> {
    rest: &'a str
}

/// Split masked SQL into statement units.
pub fn units(masked: &str) -> Units<'_> {
    Units {
        rest: masked
    }
}

impl<'a> Iterator for Units<'a> {
    type Item = Unit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest;
        if rest.is_empty() {
            return None;
        }

        let semicolon = rest.find(';');
        let batch = BATCH_SEPARATOR_REGEX.find(rest);

        let (unit, consumed) = match (semicolon, batch) {
            (_, Some(m)) if semicolon.is_none_or(|s| m.start() < s) => (
                Unit {
                    body:       &rest[..m.start()],
                    terminator: Terminator::Batch(m.as_str())
                },
                m.end()
            ),
            (Some(s), _) => (
                Unit {
                    body:       &rest[..s],
                    terminator: Terminator::Semicolon
                },
                s + 1
            ),
            (None, _) => (
                Unit {
                    body:       rest,
                    terminator: Terminator::End
                },
                rest.len()
            )
        };

        self.rest = &rest[consumed..];
        Some(unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bodies(sql: &str) -> Vec<(&str, Terminator<'_>)> {
        units(sql).map(|u| (u.body, u.terminator)).collect()
    }

    #[test]
    fn test_single_statement_without_terminator() {
        assert_eq!(bodies("SELECT 1"), vec![("SELECT 1", Terminator::End)]);
    }

    #[test]
    fn test_semicolons() {
        assert_eq!(
            bodies("SELECT 1; SELECT 2;"),
            vec![
                ("SELECT 1", Terminator::Semicolon),
                (" SELECT 2", Terminator::Semicolon)
            ]
        );
    }

    #[test]
    fn test_go_line() {
        assert_eq!(
            bodies("SELECT 1\nGO\nSELECT 2"),
            vec![
                ("SELECT 1\n", Terminator::Batch("GO\n")),
                ("SELECT 2", Terminator::End)
            ]
        );
    }

    #[test]
    fn test_go_after_semicolon_on_same_line() {
        assert_eq!(
            bodies("SELECT 1; GO"),
            vec![
                ("SELECT 1", Terminator::Semicolon),
                ("", Terminator::Batch(" GO"))
            ]
        );
    }

    #[test]
    fn test_go_with_count_and_lowercase() {
        assert_eq!(
            bodies("SELECT 1;\n  go 5\n"),
            vec![
                ("SELECT 1", Terminator::Semicolon),
                ("\n", Terminator::Batch("  go 5\n"))
            ]
        );
    }

    #[test]
    fn test_go_inside_a_line_is_not_a_separator() {
        assert_eq!(
            bodies("SELECT go FROM t"),
            vec![("SELECT go FROM t", Terminator::End)]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(bodies("").is_empty());
    }
}
