//! Type conversion functions for CLI to internal types.
//!
//! This module translates CLI-facing types (from the `cli` module) into the
//! internal types used by the output layer.

use crate::{
    cli::Format,
    config::OutputConfig,
    error::{AppResult, config_error},
    output::OutputFormat
};

/// Converts a CLI format enum to the internal output format type.
///
/// # Example
///
/// ```
/// use tsql2snow::{app::convert_format, cli::Format, output::OutputFormat};
///
/// let format = convert_format(Format::Diff);
/// assert!(matches!(format, OutputFormat::Diff));
/// ```
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml,
        Format::Diff => OutputFormat::Diff
    }
}

/// Picks the output format: the CLI flag wins, then the config file, then
/// plain text.
///
/// # Errors
///
/// Returns a config error when the config file names an unknown format.
pub fn resolve_format(cli: Option<Format>, config: &OutputConfig) -> AppResult<OutputFormat> {
    if let Some(format) = cli {
        return Ok(convert_format(format));
    }
    match config.format.as_deref() {
        None => Ok(OutputFormat::default()),
        Some(name) => OutputFormat::from_name(name).ok_or_else(|| {
            config_error(format!(
                "Unknown output format '{}' in config (expected text, json, yaml or diff)",
                name
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_format_text() {
        assert!(matches!(convert_format(Format::Text), OutputFormat::Text));
    }

    #[test]
    fn test_convert_format_json() {
        assert!(matches!(convert_format(Format::Json), OutputFormat::Json));
    }

    #[test]
    fn test_convert_format_yaml() {
        assert!(matches!(convert_format(Format::Yaml), OutputFormat::Yaml));
    }

    #[test]
    fn test_resolve_format_cli_wins() {
        let config = OutputConfig {
            format: Some("yaml".to_string()),
            ..OutputConfig::default()
        };
        assert_eq!(
            resolve_format(Some(Format::Json), &config).ok(),
            Some(OutputFormat::Json)
        );
        assert_eq!(resolve_format(None, &config).ok(), Some(OutputFormat::Yaml));
    }

    #[test]
    fn test_resolve_format_default_and_unknown() {
        assert_eq!(
            resolve_format(None, &OutputConfig::default()).ok(),
            Some(OutputFormat::Text)
        );
        let config = OutputConfig {
            format: Some("sarif".to_string()),
            ..OutputConfig::default()
        };
        assert!(resolve_format(None, &config).is_err());
    }
}
