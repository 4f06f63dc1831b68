//! Table and query hints.
//!
//! SQL Server locking hints and `OPTION (...)` query hints steer its own
//! optimizer and lock manager; Snowflake has neither, so both are dropped.
//! Only lists made entirely of known table hints are removed, so
//! `WITH (INDEX(ix))` and CTEs stay as written.

use std::sync::LazyLock;

use regex::Regex;

use super::{Rule, RuleCategory, RuleInfo};

/// Locking and isolation table hints with no Snowflake meaning.
const TABLE_HINTS: &str = "NOLOCK|READUNCOMMITTED|READCOMMITTED|REPEATABLEREAD|SERIALIZABLE|\
                           UPDLOCK|HOLDLOCK|ROWLOCK|PAGLOCK|TABLOCKX|TABLOCK|READPAST|XLOCK|NOWAIT";

/// `WITH (NOLOCK)`, `WITH (UPDLOCK, ROWLOCK)` and the whitespace in front.
static TABLE_HINT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)[ \t]*\bWITH\s*\(\s*(?:{h})\b(?:\s*,\s*(?:{h})\b)*\s*\)",
        h = TABLE_HINTS
    ))
    .expect("valid regex")
});

/// One part of a table name: a word or a masked quoted identifier.
const NAME_PART: &str = r"(?:\w+|[\x{E002}\x{E003}]\d+\x{E001})";

/// Legacy `FROM t (NOLOCK)` without `WITH`, optionally after an alias.
/// Group 1 is the table reference that stays.
static BARE_TABLE_HINT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)((?:\b(?:FROM|JOIN|UPDATE|INTO)|,)\s*{n}(?:\s*\.\s*{n})*(?:\s+(?:AS\s+)?{n})?)[ \t]*\(\s*(?:{h})\b(?:\s*,\s*(?:{h})\b)*\s*\)",
        n = NAME_PART,
        h = TABLE_HINTS
    ))
    .expect("valid regex")
});

/// `OPTION (...)` with one level of nested parentheses.
static QUERY_HINT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*\bOPTION\s*\(([^()]*(?:\([^()]*\)[^()]*)*)\)").expect("valid regex")
});

/// Remove table hints
pub struct TableHints;

impl Rule for TableHints {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:          "HINT001",
            name:        "Table hints",
            category:    RuleCategory::Hint,
            description: "WITH (NOLOCK) and other locking table hints are removed"
        }
    }

    fn apply(&self, sql: &str) -> String {
        let without_with = TABLE_HINT_REGEX.replace_all(sql, "");
        BARE_TABLE_HINT_REGEX
            .replace_all(&without_with, "$1")
            .into_owned()
    }
}

/// Remove query hints
pub struct QueryHints;

impl Rule for QueryHints {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:          "HINT002",
            name:        "Query hints",
            category:    RuleCategory::Hint,
            description: "OPTION (...) query hints such as RECOMPILE or MAXDOP are removed"
        }
    }

    fn apply(&self, sql: &str) -> String {
        QUERY_HINT_REGEX.replace_all(sql, "").into_owned()
    }
}
