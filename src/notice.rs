//! Post-conversion notices.
//!
//! The rewrite rules are best effort. After a statement is converted, its
//! masked text is scanned for T-SQL constructs that no rule rewrote, and
//! optionally the restored statement is parsed with the Snowflake dialect.
//! Neither check alters the output; both only report.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use sqlparser::{dialect::SnowflakeDialect, parser::Parser};

use crate::{converter::mask::Masked, error::format_sql_error};

/// Kind of notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeKind {
    /// A T-SQL construct with no automatic rewrite was left in place
    UnrecognizedConstruct,
    /// The converted statement does not parse as Snowflake SQL
    ParseFailure
}

impl std::fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedConstruct => write!(f, "unrecognized"),
            Self::ParseFailure => write!(f, "parse-failure")
        }
    }
}

/// Something a reader of the converted SQL should check by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind:            NoticeKind,
    /// Zero-based index of the statement in the input
    pub statement_index: usize,
    /// Short name of the construct, e.g. `APPLY`
    pub construct:       &'static str,
    pub message:         String,
    /// Offending text as it appears in the output
    pub snippet:         String
}

struct Residual {
    construct: &'static str,
    message:   &'static str,
    pattern:   Regex
}

impl Residual {
    fn new(construct: &'static str, message: &'static str, pattern: &str) -> Self {
        Self {
            construct,
            message,
            pattern: Regex::new(pattern).expect("valid regex")
        }
    }
}

/// Constructs with no automatic rewrite. Group 1, when present, is the
/// snippet; otherwise the whole match is.
static RESIDUALS: LazyLock<Vec<Residual>> = LazyLock::new(|| {
    vec![
        Residual::new(
            "TOP",
            "TOP was left in place (variable count, PERCENT, WITH TIES, existing LIMIT or set operation); rewrite the row limit by hand",
            r"(?i)\bSELECT(?:\s+(?:DISTINCT|ALL))?\s+TOP\b[^,\n]*"
        ),
        Residual::new(
            "@@variable",
            "T-SQL system variables have no Snowflake equivalent",
            r"@@[A-Za-z_]\w*"
        ),
        Residual::new(
            "APPLY",
            "CROSS/OUTER APPLY should become a LATERAL join or LATERAL FLATTEN",
            r"(?i)\b(?:CROSS|OUTER)\s+APPLY\b"
        ),
        Residual::new(
            "#temp table",
            "Local and global temp tables should become TEMPORARY tables",
            r"(?:^|[^\w@#$])(##?[A-Za-z_]\w*)"
        ),
        Residual::new(
            "variable",
            "T-SQL variables need Snowflake Scripting or session variables",
            r"(?i)\b(?:DECLARE|SET)\s+@[A-Za-z_]\w*"
        ),
        Residual::new(
            "EXEC",
            "Procedure calls use CALL in Snowflake",
            r"(?i)\bEXEC(?:UTE)?\b[^\n]*"
        ),
        Residual::new(
            "IDENTITY",
            "IDENTITY columns should use AUTOINCREMENT or a sequence",
            r"(?i)\bIDENTITY\s*\([^)\n]*\)?"
        ),
    ]
});

/// Report constructs in a converted, still-masked statement that no rule
/// rewrote.
pub fn scan(converted: &str, statement_index: usize, masked: &Masked) -> Vec<Notice> {
    let mut notices = Vec::new();
    for residual in RESIDUALS.iter() {
        for caps in residual.pattern.captures_iter(converted) {
            let Some(hit) = caps.get(1).or_else(|| caps.get(0)) else {
                continue;
            };
            notices.push(Notice {
                kind: NoticeKind::UnrecognizedConstruct,
                statement_index,
                construct: residual.construct,
                message: residual.message.to_string(),
                snippet: masked.restore(hit.as_str().trim())
            });
        }
    }
    notices
}

/// Parse one restored statement with the Snowflake dialect.
pub fn validate(sql: &str, statement_index: usize) -> Option<Notice> {
    let error = Parser::parse_sql(&SnowflakeDialect {}, sql).err()?;
    Some(Notice {
        kind: NoticeKind::ParseFailure,
        statement_index,
        construct: "statement",
        message: format_sql_error("Snowflake parse error", &error.to_string()),
        snippet: first_line(sql)
    })
}

fn first_line(sql: &str) -> String {
    sql.trim().lines().next().unwrap_or_default().to_string()
}
