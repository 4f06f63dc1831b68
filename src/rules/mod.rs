//! Rewrite rule table for T-SQL to Snowflake conversion.
//!
//! Each rule is a pure text transform over one masked statement. The
//! [`RuleSet`] holds the enabled rules in their fixed application order:
//!
//! ```text
//! IDENT001  [name]            -> "name"
//! IDENT002  N'text'           -> 'text'
//! HINT001   WITH (NOLOCK)     -> (removed)
//! HINT002   OPTION (...)      -> (removed)
//! NULL001   ISNULL(a, b)      -> COALESCE(a, b)
//! DATE001   GETDATE()         -> CURRENT_TIMESTAMP()
//! FUNC001   LEN/LEFT/...      -> LENGTH/SUBSTR/...
//! TYPE001   CONVERT(t, x)     -> CAST(x AS t)
//! TYPE002   CAST(x AS BIT)    -> CAST(x AS BOOLEAN)
//! DATE002   DATEADD(dd, ...)  -> DATEADD(day, ...)
//! ROW001    SELECT TOP n ...  -> SELECT ... LIMIT n
//! FMT001    f( a , b )        -> f(a, b)
//! BATCH001  GO                -> (removed, applied by the statement splitter)
//! ```
//!
//! Order matters where patterns overlap: brackets are rewritten before any
//! function rule looks at identifiers, `CONVERT` becomes `CAST` before cast
//! types are remapped, and whitespace is tidied last.
//!
//! # Configuration
//!
//! Rules can be disabled by ID via [`RulesConfig`]:
//!
//! ```toml
//! [rules]
//! disabled = ["FMT001", "HINT002"]
//! ```

mod casts;
mod datetime;
mod format;
mod functions;
mod hints;
mod identifiers;
mod limit;
mod types;

pub use casts::{date_style_format, map_type};
pub use datetime::normalize_date_part;
pub use types::{RuleCategory, RuleHit, RuleInfo};

use crate::config::RulesConfig;

/// `GO` removal. Applied by the statement splitter rather than as a text
/// transform, but listed and configured like any other rule.
pub const BATCH_SEPARATOR: RuleInfo = RuleInfo {
    id:          "BATCH001",
    name:        "Batch separator",
    category:    RuleCategory::Batch,
    description: "GO batch-separator lines are removed"
};

/// A single rewrite over one masked statement.
///
/// Rules must be deterministic and must not touch placeholder contents.
pub trait Rule: Send + Sync {
    /// Returns metadata about this rule.
    fn info(&self) -> RuleInfo;

    /// Rewrites `sql`, returning it unchanged when nothing matches.
    fn apply(&self, sql: &str) -> String;
}

/// Ordered, filtered rule table.
pub struct RuleSet {
    rules:                  Vec<Box<dyn Rule>>,
    strip_batch_separators: bool
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSet {
    /// All rules enabled
    pub fn new() -> Self {
        Self::with_config(&RulesConfig::default())
    }

    /// Rules minus the ones disabled in `config`
    pub fn with_config(config: &RulesConfig) -> Self {
        let rules: Vec<Box<dyn Rule>> = all_rules()
            .into_iter()
            .filter(|r| !is_disabled(config, r.info().id))
            .collect();

        Self {
            rules,
            strip_batch_separators: !is_disabled(config, BATCH_SEPARATOR.id)
        }
    }

    /// Enabled rules in application order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Number of enabled rules, counting the batch separator
    pub fn len(&self) -> usize {
        self.rules.len() + usize::from(self.strip_batch_separators)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `GO` lines are dropped from the output
    pub fn strips_batch_separators(&self) -> bool {
        self.strip_batch_separators
    }

    /// Metadata for every known rule, enabled or not
    pub fn catalog() -> Vec<RuleInfo> {
        all_rules()
            .iter()
            .map(|r| r.info())
            .chain(std::iter::once(BATCH_SEPARATOR))
            .collect()
    }

    /// Whether `id` names a known rule (case-insensitive)
    pub fn is_known(id: &str) -> bool {
        Self::catalog()
            .iter()
            .any(|info| info.id.eq_ignore_ascii_case(id))
    }
}

fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(identifiers::BracketIdentifiers),
        Box::new(identifiers::UnicodeLiteralPrefix),
        Box::new(hints::TableHints),
        Box::new(hints::QueryHints),
        Box::new(functions::IsNullToCoalesce),
        Box::new(datetime::CurrentTimestamp),
        Box::new(functions::ScalarFunctions),
        Box::new(casts::ConvertToCast),
        Box::new(casts::CastTypes),
        Box::new(datetime::DateParts),
        Box::new(limit::TopToLimit),
        Box::new(format::TidyWhitespace),
    ]
}

fn is_disabled(config: &RulesConfig, id: &str) -> bool {
    config.disabled.iter().any(|d| d.eq_ignore_ascii_case(id))
}
