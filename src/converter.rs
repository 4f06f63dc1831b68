//! T-SQL to Snowflake conversion pipeline.
//!
//! # Pipeline
//!
//! 1. `\r\n` line endings are normalized to `\n`
//! 2. Literals, comments and `"quoted"` identifiers are masked ([`mask`])
//! 3. The masked text is split into statements on `;` and `GO` lines
//!    ([`split`])
//! 4. Each statement runs through the rule table in order
//! 5. Statements are rejoined with their `;` terminators, `GO` lines dropped
//! 6. Masked fragments are restored
//!
//! The converter never fails. Anything no rule recognizes passes through
//! unchanged and, where it is a known T-SQL-only construct, is reported as a
//! [`Notice`].
//!
//! # Example
//!
//! ```
//! let out = tsql2snow::convert("SELECT TOP 5 ISNULL(Name, 'N/A') FROM [dbo].[Users];");
//! assert_eq!(out, r#"SELECT COALESCE(Name, 'N/A') FROM "dbo"."Users" LIMIT 5;"#);
//! ```

pub mod args;
pub mod mask;
pub mod split;

use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

use self::{
    mask::{Masked, content_end, is_blank},
    split::{Terminator, units}
};
use crate::{
    config::RulesConfig,
    notice::{self, Notice},
    rules::{BATCH_SEPARATOR, RuleHit, RuleSet}
};

static DEFAULT_CONVERTER: LazyLock<Converter> = LazyLock::new(Converter::new);

/// Convert T-SQL text to Snowflake SQL with every rule enabled.
pub fn convert(source: &str) -> String {
    DEFAULT_CONVERTER.convert(source).sql
}

/// One statement before and after conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementConversion {
    pub index:  usize,
    pub source: String,
    pub target: String
}

impl StatementConversion {
    pub fn is_changed(&self) -> bool {
        self.source != self.target
    }
}

/// Full outcome of converting one input text.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionResult {
    /// Converted SQL
    pub sql:        String,
    /// Per-statement source and target, in input order
    pub statements: Vec<StatementConversion>,
    /// Rules that changed a statement, in application order
    pub fired:      Vec<RuleHit>,
    pub notices:    Vec<Notice>
}

impl ConversionResult {
    /// Number of statements each fired rule changed, in first-hit order.
    pub fn rule_counts(&self) -> IndexMap<&'static str, usize> {
        let mut counts = IndexMap::new();
        for hit in &self.fired {
            *counts.entry(hit.rule_id).or_insert(0) += 1;
        }
        counts
    }

    pub fn has_notices(&self) -> bool {
        !self.notices.is_empty()
    }
}

/// Configured converter. Cheap to share across threads.
pub struct Converter {
    rules:    RuleSet,
    validate: bool
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    pub fn new() -> Self {
        Self {
            rules:    RuleSet::new(),
            validate: false
        }
    }

    pub fn with_config(config: &RulesConfig) -> Self {
        Self {
            rules:    RuleSet::with_config(config),
            validate: false
        }
    }

    /// Parse every converted statement with the Snowflake dialect and report
    /// failures as notices.
    pub fn validating(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Convert `source`, collecting rule hits and notices.
    pub fn convert(&self, source: &str) -> ConversionResult {
        let mut result = ConversionResult::default();
        if source.is_empty() {
            return result;
        }

        let source = source.replace("\r\n", "\n");
        let masked = Masked::new(&source);
        let mut out = String::with_capacity(masked.text().len());
        let mut index = 0;

        for unit in units(masked.text()) {
            let strip_batch = matches!(unit.terminator, Terminator::Batch(_))
                && self.rules.strips_batch_separators();

            if is_blank(unit.body) {
                out.push_str(unit.body);
            } else {
                let converted = self.convert_unit(unit.body, index, &mut result.fired);
                result
                    .notices
                    .extend(notice::scan(&converted, index, &masked));

                let target = masked.restore(&converted);
                if self.validate
                    && let Some(failure) = notice::validate(&target, index)
                {
                    result.notices.push(failure);
                }
                result.statements.push(StatementConversion {
                    index,
                    source: masked.restore(unit.body).trim().to_string(),
                    target: target.trim().to_string()
                });

                if strip_batch {
                    // GO ended this statement; keep it terminated
                    let end = content_end(&converted);
                    out.push_str(&converted[..end]);
                    out.push(';');
                    out.push_str(&converted[end..]);
                } else {
                    out.push_str(&converted);
                }
                index += 1;
            }

            match unit.terminator {
                Terminator::Semicolon => out.push(';'),
                Terminator::Batch(_) if strip_batch => {
                    let hit = RuleHit::new(&BATCH_SEPARATOR, index.saturating_sub(1));
                    debug!(rule = hit.rule_id, statement = hit.statement_index, "rule applied");
                    if result.fired.last() != Some(&hit) {
                        result.fired.push(hit);
                    }
                }
                Terminator::Batch(line) => out.push_str(line),
                Terminator::End => {}
            }
        }

        result.sql = masked.restore(&out);
        debug!(
            statements = result.statements.len(),
            fired = result.fired.len(),
            notices = result.notices.len(),
            "conversion finished"
        );
        result
    }

    fn convert_unit(&self, body: &str, index: usize, fired: &mut Vec<RuleHit>) -> String {
        trace!(statement = index, "converting statement");
        let mut sql = body.to_string();
        for rule in self.rules.iter() {
            let next = rule.apply(&sql);
            if next != sql {
                let info = rule.info();
                debug!(rule = info.id, statement = index, "rule applied");
                fired.push(RuleHit::new(&info, index));
                sql = next;
            }
        }
        sql
    }
}
