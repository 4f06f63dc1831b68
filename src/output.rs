use colored::Colorize;

use crate::{
    converter::ConversionResult,
    notice::{Notice, NoticeKind},
    rules::RuleInfo
};

/// Output format for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
    Diff
}

impl OutputFormat {
    /// Parse a format name as written in the config file
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" | "sql" => Some(Self::Text),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "diff" => Some(Self::Diff),
            _ => None
        }
    }

    /// Whether notices go to stderr rather than into the document itself
    pub fn reports_separately(self) -> bool {
        matches!(self, Self::Text | Self::Diff)
    }
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool,
    pub verbose: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true,
            verbose: false
        }
    }
}

/// Format a conversion for stdout
pub fn format_result(result: &ConversionResult, opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(result).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(result).unwrap_or_default(),
        OutputFormat::Text => result.sql.clone(),
        OutputFormat::Diff => format_diff(result, opts)
    }
}

/// Per-statement before/after view
pub fn format_diff(result: &ConversionResult, opts: &OutputOptions) -> String {
    let mut output = String::new();

    for statement in &result.statements {
        let header = format!("@@ statement #{} @@", statement.index + 1);
        if opts.colored {
            output.push_str(&header.cyan().bold().to_string());
        } else {
            output.push_str(&header);
        }
        output.push('\n');

        if !statement.is_changed() {
            for line in statement.source.lines() {
                output.push_str(&format!("  {}\n", line));
            }
            continue;
        }

        for line in statement.source.lines() {
            let line = format!("- {}", line);
            if opts.colored {
                output.push_str(&line.red().to_string());
            } else {
                output.push_str(&line);
            }
            output.push('\n');
        }
        for line in statement.target.lines() {
            let line = format!("+ {}", line);
            if opts.colored {
                output.push_str(&line.green().to_string());
            } else {
                output.push_str(&line);
            }
            output.push('\n');
        }
    }

    output
}

/// Human-readable notice list
pub fn format_notices(notices: &[Notice], opts: &OutputOptions) -> String {
    let mut output = String::new();

    for notice in notices {
        let label = match notice.kind {
            NoticeKind::UnrecognizedConstruct => "warning",
            NoticeKind::ParseFailure => "error"
        };
        let label = if !opts.colored {
            label.to_string()
        } else if notice.kind == NoticeKind::ParseFailure {
            label.red().bold().to_string()
        } else {
            label.yellow().bold().to_string()
        };

        output.push_str(&format!(
            "{}: statement #{}: {} ({})\n",
            label,
            notice.statement_index + 1,
            notice.message,
            notice.construct
        ));
        output.push_str(&format!("  --> {}\n", notice.snippet));
    }

    output
}

/// One-line summary of what changed
pub fn format_summary(result: &ConversionResult, opts: &OutputOptions) -> String {
    let counts = result.rule_counts();
    let rules = if counts.is_empty() {
        String::from("none")
    } else {
        counts
            .iter()
            .map(|(id, n)| format!("{} x{}", id, n))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let summary = format!(
        "Converted {} statement(s); rules applied: {}; notices: {}",
        result.statements.len(),
        rules,
        result.notices.len()
    );
    if opts.colored {
        summary.bold().to_string()
    } else {
        summary
    }
}

/// Table of rules for the `rules` command
pub fn format_rule_catalog(rules: &[RuleInfo], disabled: &[String], opts: &OutputOptions) -> String {
    let mut output = String::new();
    let id_width = rules.iter().map(|r| r.id.len()).max().unwrap_or(0);
    let category_width = rules
        .iter()
        .map(|r| r.category.to_string().len())
        .max()
        .unwrap_or(0);

    for rule in rules {
        let is_disabled = disabled.iter().any(|d| d.eq_ignore_ascii_case(rule.id));
        let id = format!("{:<width$}", rule.id, width = id_width);
        let category = format!("{:<width$}", rule.category.to_string(), width = category_width);

        let id = if !opts.colored {
            id
        } else if is_disabled {
            id.dimmed().to_string()
        } else {
            id.cyan().bold().to_string()
        };

        output.push_str(&format!("{}  {}  {}", id, category, rule.name));
        if is_disabled {
            output.push_str(" (disabled)");
        }
        output.push('\n');
        if opts.verbose {
            output.push_str(&format!("    {}\n", rule.description));
        }
    }

    output
}
