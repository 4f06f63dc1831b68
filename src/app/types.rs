//! Application types for CLI commands.
//!
//! This module defines the data structures passed between the CLI entry
//! point and the command runners.

use std::path::PathBuf;

use crate::cli::Format;

/// Parameters for the convert command.
///
/// Everything here comes from command-line flags; file and environment
/// configuration is merged in by [`run_convert`](super::run_convert).
///
/// # Example
///
/// ```
/// use tsql2snow::app::ConvertParams;
///
/// let params = ConvertParams {
///     inputs:   vec!["legacy.sql".to_string()],
///     output:   None,
///     out_dir:  None,
///     format:   None,
///     validate: false,
///     disabled: vec!["FMT001".to_string()],
///     strict:   false,
///     verbose:  false,
///     no_color: true
/// };
/// assert_eq!(params.inputs.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConvertParams {
    /// Input file paths, `-` for stdin.
    pub inputs:   Vec<String>,
    /// Single output file for one input.
    pub output:   Option<PathBuf>,
    /// Output directory for many inputs.
    pub out_dir:  Option<PathBuf>,
    /// Output format, falling back to the config file.
    pub format:   Option<Format>,
    /// Parse the converted SQL with the Snowflake dialect.
    pub validate: bool,
    /// Rule IDs disabled on the command line.
    pub disabled: Vec<String>,
    /// Exit with code 1 when notices are reported.
    pub strict:   bool,
    /// Print a per-input summary.
    pub verbose:  bool,
    /// Disable colored terminal output.
    pub no_color: bool
}

/// Output from CLI command execution.
///
/// Blocks are printed as-is; a trailing newline is added only when the
/// block lacks one.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Exit code for the process (0=success, 1=notices under --strict).
    pub exit_code: i32,
    /// Blocks to print to stdout.
    pub stdout:    Vec<String>,
    /// Blocks to print to stderr (notices, summaries).
    pub stderr:    Vec<String>
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_params_default_reads_nothing() {
        let params = ConvertParams::default();
        assert!(params.inputs.is_empty());
        assert!(params.format.is_none());
        assert!(!params.strict);
    }

    #[test]
    fn test_command_output_clone() {
        let output = CommandOutput {
            exit_code: 1,
            stdout:    vec!["SELECT 1;".to_string()],
            stderr:    Vec::new()
        };
        let cloned = output.clone();
        assert_eq!(cloned.exit_code, 1);
        assert_eq!(cloned.stdout.len(), 1);
    }
}
