//! Whitespace tidying after the other rewrites.
//!
//! Removing hints and arguments can leave `( a , b )` behind. Spaces before
//! `,` and `)` go, line breaks stay, and any whitespace after `(` goes.

use std::sync::LazyLock;

use regex::Regex;

use super::{Rule, RuleCategory, RuleInfo};

static SPACE_BEFORE_CLOSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+([,)])").expect("valid regex"));

static SPACE_AFTER_OPEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s+").expect("valid regex"));

/// Light whitespace tidy after the rewrites
pub struct TidyWhitespace;

impl Rule for TidyWhitespace {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:          "FMT001",
            name:        "Tidy whitespace",
            category:    RuleCategory::Formatting,
            description: "Whitespace before ',' and ')' and after '(' is removed"
        }
    }

    fn apply(&self, sql: &str) -> String {
        let sql = SPACE_BEFORE_CLOSE_REGEX.replace_all(sql, "$1");
        SPACE_AFTER_OPEN_REGEX.replace_all(&sql, "(").into_owned()
    }
}
