//! # Domain Types
//!
//! Core domain types shared by the interpreter, the field mapper and callers.
//!
//! ## Type Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  raw payload ──► ScanInterpreter ──► Vec<ScanField> ──► ProductRecord  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ScanField     │   │   FieldLabel    │   │  ProductRecord  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  label          │   │  GTIN           │   │  gtin           │       │
//! │  │  value          │   │  BATCH/LOT      │   │  batchNumber    │       │
//! │  │                 │   │  SERIAL         │   │  serialNumber   │       │
//! │  │                 │   │  USE BY OR ...  │   │  expiry         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │ GtinValidation  │   isValid + message + errorCode                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{GtinError, GtinErrorCode};

// =============================================================================
// Scan Field
// =============================================================================

/// One labeled field produced by a scan interpreter.
///
/// The label vocabulary is owned by the interpreter. Only the four labels in
/// [`FieldLabel`] mean anything to the field mapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScanField {
    pub label: String,
    pub value: String,
}

impl ScanField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        ScanField {
            label: label.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Field Label
// =============================================================================

/// The scan labels recognized by the field mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldLabel {
    Gtin,
    BatchLot,
    Serial,
    UseByOrExpiry,
}

impl FieldLabel {
    /// All recognized labels, in record order.
    pub const ALL: [FieldLabel; 4] = [
        FieldLabel::Gtin,
        FieldLabel::BatchLot,
        FieldLabel::Serial,
        FieldLabel::UseByOrExpiry,
    ];

    /// Looks up a label exactly as the interpreter emits it.
    pub fn from_label(label: &str) -> Option<Self> {
        FieldLabel::ALL.into_iter().find(|l| l.as_str() == label)
    }

    /// The interpreter's spelling of this label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldLabel::Gtin => "GTIN",
            FieldLabel::BatchLot => "BATCH/LOT",
            FieldLabel::Serial => "SERIAL",
            FieldLabel::UseByOrExpiry => "USE BY OR EXPIRY",
        }
    }
}

impl std::fmt::Display for FieldLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Product Record
// =============================================================================

/// The structured result of parsing one scan.
///
/// Every field is optional: a field is `None` when the scan did not carry it.
/// `expiry` is also `None` when the scanned date could not be converted for
/// display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub gtin: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub batch_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub serial_number: Option<String>,

    /// Display form, e.g. `"15 - Jun - 2025"` or `"00 - Jun - 2025"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub expiry: Option<String>,
}

impl ProductRecord {
    /// Returns true if no recognized field was found in the scan.
    pub fn is_empty(&self) -> bool {
        self.gtin.is_none()
            && self.batch_number.is_none()
            && self.serial_number.is_none()
            && self.expiry.is_none()
    }

    /// Mutable access to the slot a recognized label writes into.
    pub(crate) fn slot_mut(&mut self, label: FieldLabel) -> &mut Option<String> {
        match label {
            FieldLabel::Gtin => &mut self.gtin,
            FieldLabel::BatchLot => &mut self.batch_number,
            FieldLabel::Serial => &mut self.serial_number,
            FieldLabel::UseByOrExpiry => &mut self.expiry,
        }
    }
}

// =============================================================================
// GTIN Validation Result
// =============================================================================

/// Outcome of validating a GTIN.
///
/// Validation failures are values, never errors: UI code branches on
/// `is_valid` and localizes via `error_code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GtinValidation {
    pub is_valid: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error_code: Option<GtinErrorCode>,
}

impl GtinValidation {
    /// The result for an accepted GTIN.
    pub fn valid() -> Self {
        GtinValidation {
            is_valid: true,
            message: "GTIN is valid".to_string(),
            error_code: None,
        }
    }
}

impl From<GtinError> for GtinValidation {
    fn from(err: GtinError) -> Self {
        GtinValidation {
            is_valid: false,
            message: err.to_string(),
            error_code: Some(err.code()),
        }
    }
}

impl<T> From<Result<T, GtinError>> for GtinValidation {
    fn from(result: Result<T, GtinError>) -> Self {
        match result {
            Ok(_) => GtinValidation::valid(),
            Err(err) => err.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_label_lookup() {
        assert_eq!(FieldLabel::from_label("GTIN"), Some(FieldLabel::Gtin));
        assert_eq!(
            FieldLabel::from_label("USE BY OR EXPIRY"),
            Some(FieldLabel::UseByOrExpiry)
        );
        // Labels are matched exactly
        assert_eq!(FieldLabel::from_label("gtin"), None);
        assert_eq!(FieldLabel::from_label("PROD DATE"), None);
    }

    #[test]
    fn test_product_record_serializes_camel_case() {
        let record = ProductRecord {
            gtin: Some("00012345678905".to_string()),
            batch_number: Some("AB123".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["gtin"], "00012345678905");
        assert_eq!(json["batchNumber"], "AB123");
        // Missing fields are absent, not null
        assert!(json.get("serialNumber").is_none());
        assert!(json.get("expiry").is_none());
    }

    #[test]
    fn test_empty_record() {
        assert!(ProductRecord::default().is_empty());
    }

    #[test]
    fn test_validation_from_error() {
        let v: GtinValidation = GtinError::WrongChars.into();
        assert!(!v.is_valid);
        assert_eq!(v.error_code, Some(GtinErrorCode::WrongChars));

        let json = serde_json::to_value(GtinValidation::valid()).unwrap();
        assert_eq!(json["isValid"], true);
        assert!(json.get("errorCode").is_none());
    }
}
