//! # CLI Configuration
//!
//! Settings that shape how scans are validated and displayed.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     LEAFLET_GTIN_LENGTHS=8,12,13,14                                    │
//! │     LEAFLET_EXPIRY_POLICY=fail_closed                                  │
//! │     LEAFLET_DATE_SEPARATOR=/                                           │
//! │     LEAFLET_FULL_MONTH_NAMES=true                                      │
//! │                                                                         │
//! │  2. TOML Config File (--config, or the platform default)               │
//! │     ~/.config/leaflet/leaflet.toml (Linux)                             │
//! │     ~/Library/Application Support/org.pharmaledger.leaflet/... (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     GTIN-14 only, fail-open, "DD - Mon - YYYY", English months         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [gtin]
//! accepted_lengths = [14]
//!
//! [expiry]
//! unknown_policy = "fail_open"  # fail_open | fail_closed
//!
//! [display]
//! full_month_names = false
//! separator = "-"
//!
//! [locale]
//! month_names = ["Januar", "Februar", ...]  # optional, 12 entries
//! abbreviated_month_names = ["Jan", ...]    # optional, needs month_names
//! ```

use std::path::PathBuf;

use leaflet_core::expiry::DEFAULT_DATE_SEPARATOR;
use leaflet_core::gtin::DEFAULT_GTIN_LENGTHS;
use leaflet_core::{
    DateFormat, ExpiryChecker, FieldMapper, GtinValidator, MonthNames, UnknownExpiryPolicy,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "leaflet.toml";

/// Longest GTIN-like value a validator may be asked to accept (SSCC size).
const MAX_GTIN_LENGTH: usize = 18;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GtinSettings {
    /// Lengths a GTIN may have; anything else is `gtin_wrong_length`.
    #[serde(default = "default_gtin_lengths")]
    pub accepted_lengths: Vec<usize>,
}

fn default_gtin_lengths() -> Vec<usize> {
    DEFAULT_GTIN_LENGTHS.to_vec()
}

impl Default for GtinSettings {
    fn default() -> Self {
        GtinSettings {
            accepted_lengths: default_gtin_lengths(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirySettings {
    /// What `is_expired` answers for a date it cannot read.
    #[serde(default)]
    pub unknown_policy: UnknownExpiryPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// `June` instead of `Jun`.
    #[serde(default)]
    pub full_month_names: bool,

    /// Placed (with surrounding spaces) between day, month and year.
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    DEFAULT_DATE_SEPARATOR.to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            full_month_names: false,
            separator: default_separator(),
        }
    }
}

/// Month names for display and for parsing `15 Juni 2025`-style expiry text.
/// English when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_names: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviated_month_names: Option<Vec<String>>,
}

// =============================================================================
// Main Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub gtin: GtinSettings,

    #[serde(default)]
    pub expiry: ExpirySettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub locale: LocaleSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`leaflet.toml`)
    /// 3. Environment variables
    ///
    /// An explicitly given path must exist; the platform default may not.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if explicit || path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path).map_err(|source| {
                    CliError::ConfigRead {
                        path: path.clone(),
                        source,
                    }
                })?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        let lengths = &self.gtin.accepted_lengths;
        if lengths.is_empty() {
            return Err(CliError::InvalidConfig(
                "gtin.accepted_lengths must not be empty".into(),
            ));
        }
        if let Some(bad) = lengths.iter().find(|&&l| !(2..=MAX_GTIN_LENGTH).contains(&l)) {
            return Err(CliError::InvalidConfig(format!(
                "gtin.accepted_lengths entries must be between 2 and {}, got {}",
                MAX_GTIN_LENGTH, bad
            )));
        }

        // Display dates are parsed back by the expiry checker, which splits
        // on non-alphanumerics.
        if self.display.separator.chars().any(char::is_alphanumeric) {
            return Err(CliError::InvalidConfig(format!(
                "display.separator must not contain letters or digits, got '{}'",
                self.display.separator
            )));
        }

        if self.locale.abbreviated_month_names.is_some() && self.locale.month_names.is_none() {
            return Err(CliError::InvalidConfig(
                "locale.abbreviated_month_names requires locale.month_names".into(),
            ));
        }
        self.month_names()?;

        Ok(())
    }

    /// Applies `LEAFLET_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(lengths) = var("LEAFLET_GTIN_LENGTHS") {
            let parsed: Result<Vec<usize>, _> = lengths
                .split(',')
                .map(|part| part.trim().parse::<usize>())
                .collect();
            match parsed {
                Ok(parsed) => {
                    debug!(lengths = %lengths, "Overriding GTIN lengths from environment");
                    self.gtin.accepted_lengths = parsed;
                }
                Err(_) => warn!(lengths = %lengths, "Ignoring malformed LEAFLET_GTIN_LENGTHS"),
            }
        }

        if let Some(policy) = var("LEAFLET_EXPIRY_POLICY") {
            match policy.parse() {
                Ok(parsed) => {
                    debug!(policy = %policy, "Overriding expiry policy from environment");
                    self.expiry.unknown_policy = parsed;
                }
                Err(e) => warn!(error = %e, "Ignoring LEAFLET_EXPIRY_POLICY"),
            }
        }

        if let Some(separator) = var("LEAFLET_DATE_SEPARATOR") {
            self.display.separator = separator;
        }

        if let Some(full) = var("LEAFLET_FULL_MONTH_NAMES") {
            match full.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => self.display.full_month_names = true,
                "0" | "false" | "no" => self.display.full_month_names = false,
                _ => warn!(value = %full, "Ignoring LEAFLET_FULL_MONTH_NAMES"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "pharmaledger", "leaflet")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Core Builders
    // =========================================================================

    pub fn month_names(&self) -> CliResult<MonthNames> {
        let names = match (&self.locale.month_names, &self.locale.abbreviated_month_names) {
            (None, _) => MonthNames::english(),
            (Some(full), None) => MonthNames::new(full.clone())?,
            (Some(full), Some(abbreviated)) => {
                MonthNames::with_abbreviations(full.clone(), abbreviated.clone())?
            }
        };
        Ok(names)
    }

    pub fn date_format(&self) -> DateFormat {
        DateFormat::new(self.display.full_month_names, Some(self.display.separator.as_str()))
    }

    pub fn gtin_validator(&self) -> GtinValidator {
        GtinValidator::with_lengths(&self.gtin.accepted_lengths)
    }

    pub fn expiry_checker(&self) -> CliResult<ExpiryChecker> {
        Ok(ExpiryChecker::new(
            self.month_names()?,
            self.expiry.unknown_policy,
        ))
    }

    pub fn field_mapper(&self) -> CliResult<FieldMapper> {
        Ok(FieldMapper::new(self.month_names()?, self.date_format()))
    }
}
