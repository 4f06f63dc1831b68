//! `CONVERT`/`TRY_CONVERT` rewriting and data type remapping.
//!
//! T-SQL puts the target type first (`CONVERT(INT, x)`); Snowflake only has
//! the ANSI `CAST(x AS INT)` shape. Date styles on character conversions map
//! to a `TO_VARCHAR` format string; any other style argument is dropped.

use std::sync::LazyLock;

use regex::Regex;

use super::{Rule, RuleCategory, RuleInfo};
use crate::converter::args::{paren_depths, rewrite_calls};

static CONVERT_CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(TRY_CONVERT|CONVERT)\s*\(").expect("valid regex"));

static CAST_CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(TRY_CAST|CAST)\s*\(").expect("valid regex"));

static AS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+AS\s+").expect("valid regex"));

/// `name` or `name(params)`.
static TYPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*(?:\(\s*([^()]*?)\s*\))?$").expect("valid regex")
});

/// `CONVERT(type, expr)` becomes `CAST(expr AS type)`
pub struct ConvertToCast;

impl Rule for ConvertToCast {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:          "TYPE001",
            name:        "CONVERT to CAST",
            category:    RuleCategory::TypeConversion,
            description: "CONVERT/TRY_CONVERT(type, expr[, style]) become CAST/TRY_CAST(expr AS type) or TO_VARCHAR(expr, format)"
        }
    }

    fn apply(&self, sql: &str) -> String {
        rewrite_calls(sql, &CONVERT_CALL_REGEX, &convert_to_cast)
    }
}

/// T-SQL type names inside `CAST` mapped to Snowflake names
pub struct CastTypes;

impl Rule for CastTypes {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:          "TYPE002",
            name:        "Cast types",
            category:    RuleCategory::TypeConversion,
            description: "Type names inside CAST/TRY_CAST are remapped (DATETIME -> TIMESTAMP_NTZ, BIT -> BOOLEAN, ...)"
        }
    }

    fn apply(&self, sql: &str) -> String {
        rewrite_calls(sql, &CAST_CALL_REGEX, &remap_cast_type)
    }
}

fn convert_to_cast(name: &str, args: &[String]) -> Option<String> {
    let (target, expr, style) = match args {
        [target, expr] => (target.trim(), expr.trim(), None),
        [target, expr, style] => (target.trim(), expr.trim(), Some(style.trim())),
        _ => return None
    };
    if target.is_empty() || expr.is_empty() {
        return None;
    }

    if let Some(format) = style
        .and_then(|s| s.parse::<u16>().ok())
        .and_then(date_style_format)
        && is_character_type(target)
    {
        return Some(format!("TO_VARCHAR({}, '{}')", expr, format));
    }

    let cast = if name.eq_ignore_ascii_case("TRY_CONVERT") {
        "TRY_CAST"
    } else {
        "CAST"
    };
    Some(format!("{}({} AS {})", cast, expr, target))
}

fn remap_cast_type(name: &str, args: &[String]) -> Option<String> {
    let [arg] = args else {
        return None;
    };

    let depths = paren_depths(arg);
    let separator = AS_REGEX
        .find_iter(arg)
        .filter(|m| depths.get(m.start()).copied() == Some(0))
        .last()?;

    let raw_type = &arg[separator.end()..];
    let target = raw_type.trim_end();
    let mapped = map_type(target)?;
    Some(format!(
        "{}({}{}{}{})",
        name,
        &arg[..separator.start()],
        separator.as_str(),
        mapped,
        &raw_type[target.len()..]
    ))
}

/// Snowflake spelling of a T-SQL data type, or `None` when it carries over.
pub fn map_type(sql_type: &str) -> Option<String> {
    let caps = TYPE_REGEX.captures(sql_type.trim())?;
    let base = caps.get(1)?.as_str().to_ascii_uppercase();
    let params = caps.get(2).map(|m| m.as_str()).filter(|p| !p.is_empty());
    let is_max = params.is_some_and(|p| p.eq_ignore_ascii_case("MAX"));
    let with_params = |name: &str| match params {
        Some(p) if !is_max => format!("{}({})", name, p),
        _ => name.to_string()
    };

    let mapped = match base.as_str() {
        "DATETIME" | "SMALLDATETIME" => "TIMESTAMP_NTZ".to_string(),
        "DATETIME2" => with_params("TIMESTAMP_NTZ"),
        "DATETIMEOFFSET" => with_params("TIMESTAMP_TZ"),
        "BIT" => "BOOLEAN".to_string(),
        "NVARCHAR" => with_params("VARCHAR"),
        "NCHAR" => with_params("CHAR"),
        "NTEXT" => "TEXT".to_string(),
        "VARCHAR" if is_max => "VARCHAR".to_string(),
        "VARBINARY" => with_params("BINARY"),
        "IMAGE" => "BINARY".to_string(),
        "UNIQUEIDENTIFIER" => "VARCHAR(36)".to_string(),
        "MONEY" => "NUMBER(19,4)".to_string(),
        "SMALLMONEY" => "NUMBER(10,4)".to_string(),
        _ => return None
    };
    Some(mapped)
}

fn is_character_type(sql_type: &str) -> bool {
    let upper = sql_type.trim_start().to_ascii_uppercase();
    ["VARCHAR", "NVARCHAR", "CHAR", "NCHAR"]
        .iter()
        .any(|t| upper.starts_with(t))
}

/// Snowflake format string for a SQL Server date/time style code.
pub fn date_style_format(style: u16) -> Option<&'static str> {
    let format = match style {
        1 => "MM/DD/YY",
        101 => "MM/DD/YYYY",
        3 => "DD/MM/YY",
        103 => "DD/MM/YYYY",
        104 => "DD.MM.YYYY",
        105 => "DD-MM-YYYY",
        108 => "HH24:MI:SS",
        110 => "MM-DD-YYYY",
        111 => "YYYY/MM/DD",
        112 => "YYYYMMDD",
        23 => "YYYY-MM-DD",
        120 => "YYYY-MM-DD HH24:MI:SS",
        121 => "YYYY-MM-DD HH24:MI:SS.FF3",
        126 => "YYYY-MM-DD\"T\"HH24:MI:SS.FF3",
        _ => return None
    };
    Some(format)
}
