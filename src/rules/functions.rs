//! Scalar functions whose Snowflake spelling differs.
//!
//! `ISNULL` maps straight onto `COALESCE`. `LEN`, `LEFT`, `CHARINDEX` and
//! `NEWID` are rewritten call by call with balanced argument splitting, so
//! nested calls and arguments containing commas keep their shape.

use std::sync::LazyLock;

use regex::Regex;

use super::{Rule, RuleCategory, RuleInfo};
use crate::converter::args::rewrite_calls;

static ISNULL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bISNULL\s*\(").expect("valid regex"));

static LEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bLEN\s*\(").expect("valid regex"));

static NEWID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bNEWID\s*\(\s*\)").expect("valid regex"));

static LEFT_CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(LEFT)\s*\(").expect("valid regex"));

static CHARINDEX_CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(CHARINDEX)\s*\(").expect("valid regex"));

/// `ISNULL(a, b)` becomes `COALESCE(a, b)`
pub struct IsNullToCoalesce;

impl Rule for IsNullToCoalesce {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:          "NULL001",
            name:        "ISNULL to COALESCE",
            category:    RuleCategory::NullHandling,
            description: "ISNULL(a, b) is rewritten to COALESCE(a, b)"
        }
    }

    fn apply(&self, sql: &str) -> String {
        ISNULL_REGEX.replace_all(sql, "COALESCE(").into_owned()
    }
}

/// String and id functions whose Snowflake spelling differs
pub struct ScalarFunctions;

impl Rule for ScalarFunctions {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:          "FUNC001",
            name:        "Scalar functions",
            category:    RuleCategory::Function,
            description: "LEN, LEFT, CHARINDEX and NEWID are rewritten to LENGTH, SUBSTR, POSITION and UUID_STRING"
        }
    }

    fn apply(&self, sql: &str) -> String {
        let sql = LEN_REGEX.replace_all(sql, "LENGTH(");
        let sql = NEWID_REGEX.replace_all(&sql, "UUID_STRING()");
        let sql = rewrite_calls(&sql, &LEFT_CALL_REGEX, &left_to_substr);
        rewrite_calls(&sql, &CHARINDEX_CALL_REGEX, &charindex_to_position)
    }
}

fn left_to_substr(_name: &str, args: &[String]) -> Option<String> {
    match args {
        [text, count] => Some(format!("SUBSTR({}, 1, {})", text.trim(), count.trim())),
        _ => None
    }
}

fn charindex_to_position(_name: &str, args: &[String]) -> Option<String> {
    match args {
        [needle, haystack] => Some(format!("POSITION({} IN {})", needle.trim(), haystack.trim())),
        [needle, haystack, start] => Some(format!(
            "POSITION({}, {}, {})",
            needle.trim(),
            haystack.trim(),
            start.trim()
        )),
        _ => None
    }
}
