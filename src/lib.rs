//! # tsql2snow
//!
//! Rule-based conversion of Microsoft SQL Server (T-SQL) scripts to
//! Snowflake SQL.
//!
//! The converter is a pure function: text in, text out. An ordered table of
//! lexical rewrite rules runs over each statement while string literals,
//! comments and quoted identifiers are masked, so a rule can never corrupt
//! them. Anything no rule recognizes passes through unchanged.
//!
//! ```
//! let sql = tsql2snow::convert("SELECT TOP 10 ISNULL(Name,'N/A') FROM [dbo].[Users] WITH (NOLOCK);");
//! assert_eq!(sql, r#"SELECT COALESCE(Name,'N/A') FROM "dbo"."Users" LIMIT 10;"#);
//! ```
//!
//! # Rules
//!
//! | ID | Rewrite |
//! |----|---------|
//! | IDENT001 | `[name]` to `"name"` |
//! | IDENT002 | `N'text'` to `'text'` |
//! | HINT001 | table hints such as `WITH (NOLOCK)` removed |
//! | HINT002 | `OPTION (...)` query hints removed |
//! | NULL001 | `ISNULL` to `COALESCE` |
//! | DATE001 | `GETDATE()` to `CURRENT_TIMESTAMP()`, `GETUTCDATE()` to `SYSDATE()` |
//! | FUNC001 | `LEN`, `LEFT`, `CHARINDEX`, `NEWID` to Snowflake functions |
//! | TYPE001 | `CONVERT`/`TRY_CONVERT` to `CAST`/`TRY_CAST` or `TO_VARCHAR` |
//! | TYPE002 | T-SQL type names inside `CAST` remapped |
//! | DATE002 | date-part abbreviations spelled out, `DATEPART` to `DATE_PART` |
//! | ROW001 | `SELECT TOP n` to `LIMIT n` |
//! | FMT001 | whitespace tidy around parentheses and commas |
//! | BATCH001 | `GO` batch separators removed |
//!
//! # Exit Codes
//!
//! - `0` - Converted
//! - `1` - Notices reported under `--strict`
//! - `2` - Error (unreadable input, bad configuration, unwritable output)
//!
//! # Modules
//!
//! - [`converter`] - Masking, statement splitting and the conversion pipeline
//! - [`rules`] - The rewrite rule table
//! - [`notice`] - Reports for constructs left unconverted
//! - [`config`] - Configuration loading
//! - [`output`] - Result formatting
//! - [`app`] - CLI command runners
//! - [`error`] - Error types and constructors

pub mod app;
pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod notice;
pub mod output;
pub mod rules;

pub use converter::{ConversionResult, Converter, convert};
