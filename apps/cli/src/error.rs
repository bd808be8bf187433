//! # CLI Error Types
//!
//! Everything that can stop a `leaflet` command. Library errors from
//! `leaflet-core` are wrapped, never flattened to strings.
//!
//! ## Exit Codes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  0  command succeeded (and, for `gtin`, the GTIN is valid)              │
//! │  1  scan could not be decoded, GTIN invalid, or bad date input          │
//! │  2  configuration, I/O or output failure                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use leaflet_core::{DecodeError, ExpiryError, LocaleError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid month names: {0}")]
    Locale(#[from] LocaleError),

    // =========================================================================
    // Input Errors
    // =========================================================================
    #[error("Could not decode scan: {0}")]
    Decode(#[from] DecodeError),

    #[error("Invalid date: {0}")]
    Date(#[from] ExpiryError),

    // =========================================================================
    // Output Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Decode(_) | CliError::Date(_) => 1,
            _ => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Decode(DecodeError::EmptyPayload).exit_code(), 1);
        assert_eq!(CliError::Date(ExpiryError::Empty).exit_code(), 1);
        assert_eq!(CliError::InvalidConfig("x".into()).exit_code(), 2);
    }

    #[test]
    fn test_display_wraps_source() {
        let err = CliError::from(DecodeError::EmptyPayload);
        assert_eq!(err.to_string(), "Could not decode scan: scan payload is empty");
    }
}
