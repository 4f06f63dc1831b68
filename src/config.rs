//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.tsql2snow.toml` in current directory
//! 4. `~/.config/tsql2snow/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [rules]
//! disabled = ["FMT001", "HINT002"]
//!
//! [output]
//! format = "diff"              # text, json, yaml, diff
//! color = false
//! validate = true
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `TSQL2SNOW_DISABLED_RULES` | Comma-separated rule IDs, added to the file list |
//! | `TSQL2SNOW_VALIDATE` | `1`/`true` to parse output with the Snowflake dialect |

use std::{env, fs, path::Path};

use serde::Deserialize;

use crate::error::{AppResult, config_error};

pub const LOCAL_CONFIG_FILE: &str = ".tsql2snow.toml";

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub rules:  RulesConfig,
    #[serde(default)]
    pub output: OutputConfig
}

/// Rules configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RulesConfig {
    /// Disabled rule IDs
    #[serde(default)]
    pub disabled: Vec<String>
}

/// Output defaults, overridden by CLI flags
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Output format name
    pub format:   Option<String>,
    #[serde(default = "default_color")]
    pub color:    bool,
    #[serde(default)]
    pub validate: bool
}

fn default_color() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format:   None,
            color:    true,
            validate: false
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.tsql2snow.toml)
    /// 3. Config file in home directory (~/.config/tsql2snow/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(home) = env::var_os("HOME") {
            let home_config = Path::new(&home)
                .join(".config")
                .join("tsql2snow")
                .join("config.toml");

            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        // Local config replaces the home one wholesale
        let local_config = Path::new(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            config = Self::from_file(local_config)?;
        }

        config.apply_env(
            env::var("TSQL2SNOW_DISABLED_RULES").ok().as_deref(),
            env::var("TSQL2SNOW_VALIDATE").ok().as_deref()
        )?;
        Ok(config)
    }

    /// Read and parse one config file
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse TOML config content
    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
    }

    /// Apply environment overrides given as raw variable values
    pub fn apply_env(&mut self, disabled: Option<&str>, validate: Option<&str>) -> AppResult<()> {
        if let Some(list) = disabled {
            for id in list.split(',').map(str::trim).filter(|id| !id.is_empty()) {
                if !self
                    .rules
                    .disabled
                    .iter()
                    .any(|d| d.eq_ignore_ascii_case(id))
                {
                    self.rules.disabled.push(id.to_string());
                }
            }
        }

        if let Some(value) = validate {
            self.output.validate = parse_flag(value).ok_or_else(|| {
                config_error(format!(
                    "Invalid TSQL2SNOW_VALIDATE value '{}' (expected true/false/1/0)",
                    value
                ))
            })?;
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None
    }
}
