//! Type definitions for the rewrite rule table.
//!
//! - [`RuleCategory`] - What kind of construct a rule rewrites
//! - [`RuleInfo`] - Static metadata for listing and configuration
//! - [`RuleHit`] - A rule that changed a statement during conversion

use serde::Serialize;

/// Category of a rule for grouping and listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RuleCategory {
    /// `TOP` to `LIMIT`
    RowLimit,
    /// `ISNULL` and friends
    NullHandling,
    /// Current-time functions and date-part arguments
    DateTime,
    /// Identifier quoting and literal prefixes
    Identifier,
    /// Table and query hints
    Hint,
    /// `CONVERT`, `CAST` and type names
    TypeConversion,
    /// Scalar functions with a different Snowflake name or shape
    Function,
    /// `GO` batch separators
    Batch,
    /// Whitespace tidying
    Formatting
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RowLimit => write!(f, "Row limit"),
            Self::NullHandling => write!(f, "Null handling"),
            Self::DateTime => write!(f, "Date/time"),
            Self::Identifier => write!(f, "Identifier"),
            Self::Hint => write!(f, "Hint"),
            Self::TypeConversion => write!(f, "Type conversion"),
            Self::Function => write!(f, "Function"),
            Self::Batch => write!(f, "Batch"),
            Self::Formatting => write!(f, "Formatting")
        }
    }
}

/// Metadata about a rule for identification and configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleInfo {
    /// Unique rule identifier (e.g., "ROW001")
    pub id:          &'static str,
    /// Human-readable rule name
    pub name:        &'static str,
    /// Rule category
    pub category:    RuleCategory,
    /// One-line summary of the rewrite
    pub description: &'static str
}

/// A rule that changed one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleHit {
    /// Rule identifier
    pub rule_id:         &'static str,
    /// Human-readable rule name
    pub rule_name:       &'static str,
    /// Zero-based index of the statement in the input
    pub statement_index: usize
}

impl RuleHit {
    pub fn new(info: &RuleInfo, statement_index: usize) -> Self {
        Self {
            rule_id: info.id,
            rule_name: info.name,
            statement_index
        }
    }
}
