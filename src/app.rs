//! Application logic for the tsql2snow CLI.
//!
//! This module contains the command runners separated from the main entry
//! point so they can be tested without spawning the binary.
//!
//! - [`types`] - Command parameters and output
//! - [`convert`] - CLI to internal type conversion
//! - [`helpers`] - Input, output, exit codes and logging setup
//! - [`run`] - The `convert` and `rules` commands

pub mod convert;
pub mod helpers;
pub mod run;
pub mod types;

pub use convert::{convert_format, resolve_format};
pub use helpers::{
    calculate_exit_code, create_output_options, init_logging, merge_disabled, output_path,
    output_targets, read_sql_input, write_output
};
pub use run::{run_convert, run_rules};
pub use types::{CommandOutput, ConvertParams};
