use crate::error::{Result, SiftError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DEBOUNCE_MS: u64 = 250;
const DEFAULT_EXPORT_PREFIX: &str = "university-sites";

/// Keys accepted by [`SiftConfig::get`] and [`SiftConfig::set`].
pub const CONFIG_KEYS: [&str; 4] = ["debounce_ms", "highlight", "export_prefix", "multi_value_match"];

/// How a selected value is compared against Environments and CMS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Selected value is a case-insensitive substring of the comma-joined field.
    /// `prod` also matches `preprod`.
    #[default]
    Substring,
    /// Selected value equals one of the parsed tokens, ignoring case.
    Token,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Substring => f.write_str("substring"),
            MatchMode::Token => f.write_str("token"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "substring" => Ok(MatchMode::Substring),
            "token" => Ok(MatchMode::Token),
            other => Err(SiftError::Config(format!(
                "multi_value_match must be 'substring' or 'token', got '{}'",
                other
            ))),
        }
    }
}

/// Configuration for sitesift, stored as config.json in the config directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiftConfig {
    /// Quiet period before typed search input is committed
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Initial state of the highlight toggle
    #[serde(default)]
    pub highlight: bool,

    /// Leading part of generated export filenames
    #[serde(default = "default_export_prefix")]
    pub export_prefix: String,

    #[serde(default)]
    pub multi_value_match: MatchMode,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_export_prefix() -> String {
    DEFAULT_EXPORT_PREFIX.to_string()
}

impl Default for SiftConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            highlight: false,
            export_prefix: default_export_prefix(),
            multi_value_match: MatchMode::default(),
        }
    }
}

impl SiftConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(SiftError::Io)?;
        let config: SiftConfig = serde_json::from_str(&content).map_err(SiftError::Json)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(SiftError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(SiftError::Json)?;
        fs::write(config_path, content).map_err(SiftError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "debounce_ms" => Some(self.debounce_ms.to_string()),
            "highlight" => Some(self.highlight.to_string()),
            "export_prefix" => Some(self.export_prefix.clone()),
            "multi_value_match" => Some(self.multi_value_match.to_string()),
            _ => None,
        }
    }

    /// Set a value by key, validating it first
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "debounce_ms" => {
                self.debounce_ms = value.parse().map_err(|_| {
                    SiftError::Config(format!(
                        "debounce_ms must be a whole number of milliseconds, got '{}'",
                        value
                    ))
                })?;
            }
            "highlight" => {
                self.highlight = match value.to_lowercase().as_str() {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => {
                        return Err(SiftError::Config(format!(
                            "highlight must be true or false, got '{}'",
                            value
                        )))
                    }
                };
            }
            "export_prefix" => {
                if value.is_empty() {
                    return Err(SiftError::Config("export_prefix cannot be empty".into()));
                }
                self.export_prefix = value.to_string();
            }
            "multi_value_match" => self.multi_value_match = value.parse()?,
            other => {
                return Err(SiftError::Config(format!(
                    "Unknown config key: {} (expected one of: {})",
                    other,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// All keys with their current values, in a stable order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }
}

/// The platform configuration directory for sitesift.
pub fn default_config_dir() -> Result<PathBuf> {
    ProjectDirs::from("edu", "sitesift", "sitesift")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| SiftError::Config("Could not determine config dir".into()))
}
