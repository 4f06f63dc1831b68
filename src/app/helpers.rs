//! Helper functions for CLI operations.
//!
//! This module provides utility functions used by the command runners for
//! tasks such as reading input, writing output, merging rule settings,
//! calculating exit codes, and setting up logging.

use std::{
    fs::{read_to_string, write},
    io::{self, Read},
    path::{Path, PathBuf}
};

use indexmap::IndexMap;
use tracing_subscriber::EnvFilter;

use crate::{
    converter::ConversionResult,
    error::{AppError, AppResult, config_error, file_read_error, file_write_error},
    output::{OutputFormat, OutputOptions},
    rules::RuleSet
};

/// Calculates the process exit code from the conversion results.
///
/// - `0` - Converted, or notices found without `--strict`
/// - `1` - At least one notice under `--strict`
///
/// Errors never reach this point; `main` maps them to `2`.
///
/// # Example
///
/// ```
/// use tsql2snow::{app::calculate_exit_code, converter::Converter};
///
/// let result = Converter::new().convert("SELECT TOP 1 * FROM t");
/// assert_eq!(calculate_exit_code(&[result], true), 0);
/// ```
pub fn calculate_exit_code(results: &[ConversionResult], strict: bool) -> i32 {
    if strict && results.iter().any(ConversionResult::has_notices) {
        1
    } else {
        0
    }
}

/// Reads SQL from a file or stdin.
///
/// Supports reading from a file path or from standard input when the
/// path is "-".
///
/// # Errors
///
/// Returns an error if the file cannot be read or stdin fails.
pub fn read_sql_input(path: &str) -> AppResult<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        Ok(buffer)
    } else {
        read_to_string(path).map_err(|e| file_read_error(path, e))
    }
}

/// Writes converted output to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_output(path: &Path, content: &str) -> AppResult<()> {
    write(path, content).map_err(|e| file_write_error(&path.display().to_string(), e))
}

/// Output file for `input` inside `out_dir`.
///
/// The extension follows the output format so converted SQL never
/// overwrites its source: `orders.sql` becomes `orders.snowflake.sql`.
pub fn output_path(out_dir: &Path, input: &str, format: OutputFormat) -> PathBuf {
    let stem = Path::new(input)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("output"));
    let extension = match format {
        OutputFormat::Text => "sql",
        OutputFormat::Json => "json",
        OutputFormat::Yaml => "yaml",
        OutputFormat::Diff => "diff"
    };
    out_dir.join(format!("{}.snowflake.{}", stem, extension))
}

/// Output files for every input, in input order.
///
/// # Errors
///
/// Returns a config error when two inputs would write the same file, such as
/// `a/q.sql` and `b/q.sql`.
pub fn output_targets(
    out_dir: &Path,
    inputs: &[String],
    format: OutputFormat
) -> AppResult<Vec<PathBuf>> {
    let mut seen: IndexMap<PathBuf, &str> = IndexMap::with_capacity(inputs.len());
    for input in inputs {
        let target = output_path(out_dir, input, format);
        if let Some(first) = seen.insert(target.clone(), input.as_str()) {
            return Err(config_error(format!(
                "Inputs '{}' and '{}' both convert to '{}'",
                first,
                input,
                target.display()
            )));
        }
    }
    Ok(seen.into_keys().collect())
}

/// Merges rule IDs disabled in the config with those from the CLI.
///
/// # Errors
///
/// Returns a config error naming the first unknown rule ID.
pub fn merge_disabled(config: &[String], cli: &[String]) -> AppResult<Vec<String>> {
    let mut merged: Vec<String> = Vec::with_capacity(config.len() + cli.len());
    for id in config.iter().chain(cli) {
        if !RuleSet::is_known(id) {
            return Err(config_error(format!(
                "Unknown rule ID '{}' (run `tsql2snow rules` for the list)",
                id
            )));
        }
        if !merged.iter().any(|m| m.eq_ignore_ascii_case(id)) {
            merged.push(id.to_ascii_uppercase());
        }
    }
    Ok(merged)
}

/// Creates output options from CLI and config settings.
pub fn create_output_options(
    format: OutputFormat,
    no_color: bool,
    config_color: bool,
    verbose: bool
) -> OutputOptions {
    OutputOptions {
        format,
        colored: !no_color && config_color,
        verbose
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `info`, or `debug` with
/// `--verbose`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init_logging(verbose: bool) -> AppResult<()> {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| AppError::internal(format!("Failed to initialise logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::Converter;

    #[test]
    fn test_exit_code_without_notices() {
        let result = Converter::new().convert("SELECT TOP 5 * FROM t");
        assert_eq!(calculate_exit_code(&[result], true), 0);
    }

    #[test]
    fn test_exit_code_notices_need_strict() {
        let result = Converter::new().convert("SELECT @@ROWCOUNT");
        assert_eq!(calculate_exit_code(std::slice::from_ref(&result), false), 0);
        assert_eq!(calculate_exit_code(&[result], true), 1);
    }

    #[test]
    fn test_merge_disabled_dedups_and_uppercases() {
        let merged = merge_disabled(
            &["FMT001".to_string()],
            &["fmt001".to_string(), "row001".to_string()]
        )
        .expect("known rules");
        assert_eq!(merged, vec!["FMT001", "ROW001"]);
    }

    #[test]
    fn test_merge_disabled_rejects_unknown() {
        let err = merge_disabled(&[], &["PERF001".to_string()]);
        assert!(err.is_err());
    }

    #[test]
    fn test_output_path() {
        let path = output_path(Path::new("out"), "src/orders.sql", OutputFormat::Text);
        assert_eq!(path, Path::new("out").join("orders.snowflake.sql"));
        let path = output_path(Path::new("out"), "report", OutputFormat::Json);
        assert_eq!(path, Path::new("out").join("report.snowflake.json"));
    }

    #[test]
    fn test_output_targets_keep_input_order() {
        let inputs = vec!["b.sql".to_string(), "a.sql".to_string()];
        let targets = output_targets(Path::new("out"), &inputs, OutputFormat::Text)
            .expect("distinct targets");
        assert_eq!(
            targets,
            vec![
                Path::new("out").join("b.snowflake.sql"),
                Path::new("out").join("a.snowflake.sql")
            ]
        );
    }

    #[test]
    fn test_output_targets_reject_shared_stem() {
        let inputs = vec!["x/q.sql".to_string(), "y/q.sql".to_string()];
        assert!(output_targets(Path::new("out"), &inputs, OutputFormat::Text).is_err());
    }

    #[test]
    fn test_create_output_options() {
        let opts = create_output_options(OutputFormat::Json, false, true, true);
        assert!(opts.colored);
        assert!(opts.verbose);
        let opts = create_output_options(OutputFormat::Text, false, false, false);
        assert!(!opts.colored);
    }

    #[test]
    fn test_read_missing_file() {
        assert!(read_sql_input("/nonexistent/definitely/missing.sql").is_err());
    }
}
