use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// tsql2snow - Convert T-SQL (SQL Server) scripts to Snowflake SQL
#[derive(Parser, Debug)]
#[command(name = "tsql2snow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert T-SQL files to Snowflake SQL
    Convert {
        /// Input files (use - for stdin)
        #[arg(default_value = "-")]
        inputs: Vec<String>,

        /// Write the converted SQL to this file instead of stdout
        #[arg(short, long, conflicts_with = "out_dir")]
        output: Option<PathBuf>,

        /// Write one converted file per input into this directory
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, value_enum)]
        format: Option<Format>,

        /// Parse the converted SQL with the Snowflake dialect
        #[arg(long)]
        validate: bool,

        /// Disable a rule by ID (repeatable)
        #[arg(long = "disable", value_name = "RULE_ID")]
        disabled: Vec<String>,

        /// Exit with code 1 when any notice is reported
        #[arg(long)]
        strict: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    },

    /// List the conversion rules
    Rules {
        /// Disable colored output
        #[arg(long)]
        no_color: bool
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml,
    Diff
}
