//! Identifier quoting and literal prefixes.
//!
//! Bracketed identifiers never reach these rules as text: masking lifts them
//! into placeholders, and IDENT001 only swaps the placeholder opener so the
//! fragment is restored double-quoted. Array subscripts such as `v:items[0]`
//! are not masked as identifiers and pass through untouched.

use std::sync::LazyLock;

use regex::Regex;

use super::{Rule, RuleCategory, RuleInfo};
use crate::converter::mask::{BRACKET_OPEN, IDENT_OPEN, LITERAL_OPEN};

/// `N` glued to a masked string literal.
static UNICODE_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\bN({LITERAL_OPEN})")).expect("valid regex")
});

/// `[ident]` becomes `"ident"`
pub struct BracketIdentifiers;

impl Rule for BracketIdentifiers {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:          "IDENT001",
            name:        "Bracket identifiers",
            category:    RuleCategory::Identifier,
            description: "[name] is rewritten to \"name\""
        }
    }

    fn apply(&self, sql: &str) -> String {
        sql.replace(BRACKET_OPEN, IDENT_OPEN.encode_utf8(&mut [0; 4]))
    }
}

/// `N'text'` loses its prefix
pub struct UnicodeLiteralPrefix;

impl Rule for UnicodeLiteralPrefix {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:          "IDENT002",
            name:        "Unicode literal prefix",
            category:    RuleCategory::Identifier,
            description: "N'text' is rewritten to 'text'; Snowflake strings are always Unicode"
        }
    }

    fn apply(&self, sql: &str) -> String {
        UNICODE_PREFIX_REGEX.replace_all(sql, "$1").into_owned()
    }
}
