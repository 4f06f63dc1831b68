//! Current-time functions and date-part arguments.
//!
//! `DATEADD`/`DATEDIFF` keep their names, but T-SQL date-part abbreviations
//! (`dd`, `mi`, `n`, `dw`) are not all valid in Snowflake or mean something
//! else there, so the first argument is spelled out. `DATEPART` becomes
//! `DATE_PART` on the way.

use std::sync::LazyLock;

use regex::Regex;

use super::{Rule, RuleCategory, RuleInfo};
use crate::converter::args::rewrite_calls;

static LOCAL_NOW_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:GETDATE|SYSDATETIME)\s*\(\s*\)").expect("valid regex")
});

static UTC_NOW_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:GETUTCDATE|SYSUTCDATETIME)\s*\(\s*\)").expect("valid regex")
});

static DATE_PART_CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(DATEADD|DATEDIFF|DATEPART)\s*\(").expect("valid regex")
});

/// `GETDATE()` becomes `CURRENT_TIMESTAMP()`
pub struct CurrentTimestamp;

impl Rule for CurrentTimestamp {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:          "DATE001",
            name:        "Current timestamp",
            category:    RuleCategory::DateTime,
            description: "GETDATE()/SYSDATETIME() become CURRENT_TIMESTAMP(); GETUTCDATE()/SYSUTCDATETIME() become SYSDATE()"
        }
    }

    fn apply(&self, sql: &str) -> String {
        let sql = LOCAL_NOW_REGEX.replace_all(sql, "CURRENT_TIMESTAMP()");
        UTC_NOW_REGEX.replace_all(&sql, "SYSDATE()").into_owned()
    }
}

/// Date-part abbreviations spelled out
pub struct DateParts;

impl Rule for DateParts {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:          "DATE002",
            name:        "Date parts",
            category:    RuleCategory::DateTime,
            description: "DATEADD/DATEDIFF date parts are spelled out (dd -> day); DATEPART becomes DATE_PART"
        }
    }

    fn apply(&self, sql: &str) -> String {
        rewrite_calls(sql, &DATE_PART_CALL_REGEX, &rewrite_date_call)
    }
}

fn rewrite_date_call(name: &str, args: &[String]) -> Option<String> {
    let [part, rest @ ..] = args else {
        return None;
    };
    if rest.is_empty() {
        return None;
    }

    let raw_part = part.trim();
    let normalized = normalize_date_part(raw_part).unwrap_or(raw_part);
    let is_datepart = name.eq_ignore_ascii_case("DATEPART");
    if !is_datepart && normalized.eq_ignore_ascii_case(raw_part) {
        return None;
    }

    let function = if is_datepart { "DATE_PART" } else { name };
    Some(format!("{}({},{})", function, normalized, rest.join(",")))
}

/// Spell out a T-SQL date-part abbreviation.
pub fn normalize_date_part(token: &str) -> Option<&'static str> {
    let part = match token.to_ascii_lowercase().as_str() {
        "yy" | "yyyy" | "yr" | "year" => "year",
        "qq" | "q" | "quarter" => "quarter",
        "mm" | "m" | "month" => "month",
        "wk" | "ww" | "week" => "week",
        "dd" | "d" | "day" => "day",
        "dy" | "y" | "dayofyear" => "dayofyear",
        "dw" | "weekday" => "dayofweek",
        "hh" | "hour" => "hour",
        "mi" | "n" | "minute" => "minute",
        "ss" | "s" | "second" => "second",
        "ms" | "millisecond" => "millisecond",
        "mcs" | "microsecond" => "microsecond",
        "ns" | "nanosecond" => "nanosecond",
        _ => return None
    };
    Some(part)
}
