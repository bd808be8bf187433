//! # Error Types
//!
//! Domain-specific error types for leaflet-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  leaflet-core errors (this file)                                       │
//! │  ├── GtinError     - GTIN rejected (wrong chars / length / digit)      │
//! │  ├── ExpiryError   - Expiry date could not be normalized               │
//! │  ├── DecodeError   - Scan payload could not be interpreted             │
//! │  └── LocaleError   - Month-name table is malformed                     │
//! │                                                                         │
//! │  leaflet-cli errors (separate crate)                                   │
//! │  └── CliError      - Config, I/O and output failures                   │
//! │                                                                         │
//! │  How each one surfaces:                                                │
//! │    GtinError   → GtinValidation { is_valid: false, error_code }        │
//! │    ExpiryError → None / ExpiryStatus::Unknown (fail-open)              │
//! │    DecodeError → propagated unchanged to the caller                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (AI, position, expected digit)
//! 3. Errors are enum variants, never String
//! 4. GTIN errors map to stable codes consumed by UI localization

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// GTIN Error
// =============================================================================

/// Stable error codes for GTIN validation failures.
///
/// These are contract values: calling UI code looks up localized messages by
/// them, so the serialized names must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GtinErrorCode {
    /// Empty value or a non-digit character.
    #[serde(rename = "gtin_wrong_chars")]
    WrongChars,
    /// Digit count outside the accepted lengths.
    #[serde(rename = "gtin_wrong_length")]
    WrongLength,
    /// Last digit does not match the computed check digit.
    #[serde(rename = "gtin_wrong_digit")]
    WrongDigit,
}

impl GtinErrorCode {
    /// Returns the stable identifier (same as the serialized form).
    pub const fn as_str(&self) -> &'static str {
        match self {
            GtinErrorCode::WrongChars => "gtin_wrong_chars",
            GtinErrorCode::WrongLength => "gtin_wrong_length",
            GtinErrorCode::WrongDigit => "gtin_wrong_digit",
        }
    }
}

impl std::fmt::Display for GtinErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A GTIN was rejected by the check-digit validator.
///
/// The `Display` text is the user-facing message carried in
/// [`GtinValidation`](crate::types::GtinValidation).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GtinError {
    /// Empty value or a character other than `0-9`.
    #[error("GTIN should be a numeric value")]
    WrongChars,

    /// Length is not one of the accepted GTIN lengths.
    ///
    /// `accepted` is the human-readable list, e.g. `"14"` or `"8, 12, 13 or 14"`.
    #[error("GTIN length should be {accepted}")]
    WrongLength { accepted: String, actual: usize },

    /// The final digit does not match the computed check digit.
    #[error("Invalid GTIN. Last digit should be {expected}")]
    WrongDigit { expected: u8, actual: u8 },
}

impl GtinError {
    /// Returns the stable error code for this failure.
    pub const fn code(&self) -> GtinErrorCode {
        match self {
            GtinError::WrongChars => GtinErrorCode::WrongChars,
            GtinError::WrongLength { .. } => GtinErrorCode::WrongLength,
            GtinError::WrongDigit { .. } => GtinErrorCode::WrongDigit,
        }
    }
}

// =============================================================================
// Expiry Error
// =============================================================================

/// An expiry date could not be normalized.
///
/// Never shown to users directly: the public expiry helpers collapse it to
/// `None` / [`ExpiryStatus::Unknown`](crate::expiry::ExpiryStatus::Unknown).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpiryError {
    /// Nothing left after stripping whitespace.
    #[error("expiry date is empty")]
    Empty,

    /// The input matches none of the accepted date layouts.
    #[error("unrecognized date format: '{0}'")]
    UnrecognizedFormat(String),

    /// A numeric segment could not be parsed.
    #[error("{part} is not numeric: '{value}'")]
    NotNumeric { part: &'static str, value: String },

    /// Month name not present in the month table.
    #[error("unknown month name: '{0}'")]
    UnknownMonth(String),

    /// Month number outside 1-12.
    #[error("month {0} is out of range")]
    MonthOutOfRange(u32),

    /// Year/month/day do not form a real calendar date.
    #[error("{year:04}-{month:02}-{day:02} is not a valid calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// The end-of-day instant does not exist in the time zone or is not
    /// after the Unix epoch.
    #[error("no usable end-of-day timestamp for {0}")]
    NoTimestamp(chrono::NaiveDate),
}

/// An unknown-expiry policy name could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown expiry policy '{0}'. Valid options: fail_open, fail_closed")]
pub struct UnknownPolicyError(pub String);

// =============================================================================
// Decode Error
// =============================================================================

/// A scan payload could not be interpreted into GS1 fields.
///
/// This is the one failure a consumer must be prepared to handle: the scan
/// parser never recovers from it locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Payload is empty (or only a symbology identifier).
    #[error("scan payload is empty")]
    EmptyPayload,

    /// No known application identifier at this position.
    #[error("unknown application identifier at position {position}: '{found}'")]
    UnknownAi { position: usize, found: String },

    /// AI present but no value follows it.
    #[error("AI ({ai}) has no value")]
    MissingValue { ai: String },

    /// Fixed-length AI with the wrong number of characters.
    #[error("AI ({ai}) must be {expected} characters, got {actual}")]
    WrongLength {
        ai: String,
        expected: usize,
        actual: usize,
    },

    /// Variable-length AI longer than its maximum.
    #[error("AI ({ai}) must be at most {max} characters, got {actual}")]
    TooLong { ai: String, max: usize, actual: usize },

    /// Value has characters or content not allowed for this AI.
    #[error("AI ({ai}) has an invalid value: {reason}")]
    InvalidValue { ai: String, reason: String },

    /// Bracketed payload is not well-formed, e.g. `(01` without `)`.
    #[error("malformed bracketed element string: {0}")]
    MalformedBrackets(String),

    /// Digital Link URI could not be used.
    #[error("invalid GS1 Digital Link: {0}")]
    InvalidDigitalLink(String),
}

// =============================================================================
// Locale Error
// =============================================================================

/// A month-name table could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    /// The table does not have exactly 12 entries.
    #[error("{kind} month names must have 12 entries, got {actual}")]
    WrongCount { kind: &'static str, actual: usize },

    /// An entry is blank.
    #[error("{kind} month name for month {month} is empty")]
    EmptyName { kind: &'static str, month: usize },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for expiry normalization results.
pub type ExpiryResult<T> = Result<T, ExpiryError>;

/// Convenience type alias for interpreter results.
pub type DecodeResult<T> = Result<T, DecodeError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gtin_error_messages() {
        let err = GtinError::WrongDigit {
            expected: 5,
            actual: 4,
        };
        assert_eq!(err.to_string(), "Invalid GTIN. Last digit should be 5");

        let err = GtinError::WrongLength {
            accepted: "14".to_string(),
            actual: 13,
        };
        assert_eq!(err.to_string(), "GTIN length should be 14");

        assert_eq!(
            GtinError::WrongChars.to_string(),
            "GTIN should be a numeric value"
        );
    }

    #[test]
    fn test_gtin_error_codes_are_stable() {
        assert_eq!(GtinError::WrongChars.code().as_str(), "gtin_wrong_chars");
        assert_eq!(
            serde_json::to_string(&GtinErrorCode::WrongLength).unwrap(),
            "\"gtin_wrong_length\""
        );
        assert_eq!(
            serde_json::from_str::<GtinErrorCode>("\"gtin_wrong_digit\"").unwrap(),
            GtinErrorCode::WrongDigit
        );
    }

    #[test]
    fn test_decode_error_messages() {
        let err = DecodeError::WrongLength {
            ai: "01".to_string(),
            expected: 14,
            actual: 13,
        };
        assert_eq!(err.to_string(), "AI (01) must be 14 characters, got 13");
    }

    #[test]
    fn test_expiry_error_messages() {
        let err = ExpiryError::InvalidDate {
            year: 2025,
            month: 2,
            day: 30,
        };
        assert_eq!(err.to_string(), "2025-02-30 is not a valid calendar date");
    }
}
