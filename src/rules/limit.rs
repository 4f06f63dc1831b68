//! `SELECT TOP n` to trailing `LIMIT n`.
//!
//! This is the one rule with a non-local effect: the row limit moves from
//! the select list to the end of the query it belongs to. The query's scope
//! ends at the statement end, at the `)` that closes the subquery the
//! `SELECT` sits in, or at a line that starts the next statement of a batch
//! written without `;`.
//!
//! Forms that have no faithful `LIMIT` spelling pass through unchanged:
//! `TOP (@n)`, `TOP n PERCENT`, `TOP n WITH TIES`, a scope that already has
//! its own `LIMIT`, and a scope joined with `UNION`/`INTERSECT`/`EXCEPT`
//! (where `TOP` binds to the first branch only).

use std::sync::LazyLock;

use regex::Regex;

use super::{Rule, RuleCategory, RuleInfo};
use crate::converter::{
    args::{paren_depths, scope_end},
    mask::content_end
};

static TOP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(SELECT(?:\s+(?:DISTINCT|ALL))?)\s+TOP(?:\s*\(\s*(\d+)\s*\)|\s+(\d+)\b)(\s+PERCENT\b|\s+WITH\s+TIES\b)?\s*"
    )
    .expect("valid regex")
});

static LIMIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bLIMIT\b").expect("valid regex"));

/// A line opening another statement in a `;`-less batch.
static STATEMENT_START_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(?:SELECT|INSERT|UPDATE|DELETE|MERGE|DECLARE|SET|EXEC|EXECUTE|CREATE|ALTER|DROP|TRUNCATE|WITH\s+[A-Za-z_])\b"
    )
    .expect("valid regex")
});

static SET_OPERATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:UNION|INTERSECT|EXCEPT)\b").expect("valid regex"));

/// `SELECT TOP n ...` becomes `SELECT ... LIMIT n`
pub struct TopToLimit;

impl Rule for TopToLimit {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:          "ROW001",
            name:        "TOP to LIMIT",
            category:    RuleCategory::RowLimit,
            description: "SELECT TOP n / TOP (n) is removed and LIMIT n appended to the query"
        }
    }

    fn apply(&self, sql: &str) -> String {
        let mut out = sql.to_string();
        let mut from = 0;

        while let Some((rewritten, resume)) = next_top(&out, from) {
            if let Some(next) = rewritten {
                out = next;
            }
            from = resume;
        }
        out
    }
}

/// Handle the first `TOP` at or after `from`.
///
/// Yields the rewritten text (or `None` when this `TOP` passes through) and
/// the offset to resume searching from.
fn next_top(sql: &str, from: usize) -> Option<(Option<String>, usize)> {
    let caps = TOP_REGEX.captures_at(sql, from)?;
    let whole = caps.get(0)?;
    let select = caps.get(1)?.as_str();
    let count = caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str());

    let step = match (count, caps.get(4)) {
        (Some(count), None) => move_top_to_limit(sql, whole.start(), whole.end(), select, count)
            .map(|(next, resume)| (Some(next), resume)),
        _ => None
    };
    Some(step.unwrap_or((None, whole.end())))
}

/// Rewrite one `SELECT ... TOP n` occupying `start..end`.
///
/// Returns the new text and the offset to resume searching from.
fn move_top_to_limit(
    sql: &str,
    start: usize,
    end: usize,
    select: &str,
    count: &str
) -> Option<(String, usize)> {
    let scope = &sql[end..scope_end(sql, end)];
    let depths = paren_depths(scope);
    let at_scope_level = |m: regex::Match<'_>| depths.get(m.start()).copied() == Some(0);
    let scope = STATEMENT_START_REGEX
        .find_iter(scope)
        .find(|m| m.start() > 0 && at_scope_level(*m))
        .map_or(scope, |m| &scope[..m.start()]);

    if LIMIT_REGEX.find_iter(scope).any(at_scope_level)
        || SET_OPERATOR_REGEX.find_iter(scope).any(at_scope_level)
    {
        return None;
    }

    let insert_at = end + content_end(scope);
    let mut out = String::with_capacity(sql.len() + count.len() + 8);
    out.push_str(&sql[..start]);
    out.push_str(select);
    out.push(' ');
    let resume = out.len();
    out.push_str(&sql[end..insert_at]);
    out.push_str(" LIMIT ");
    out.push_str(count);
    out.push_str(&sql[insert_at..]);
    Some((out, resume))
}
