//! # Field Mapper
//!
//! Maps an interpreter's ordered field list onto a [`ProductRecord`].
//!
//! ## Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ScanField.label        ProductRecord field      Conversion            │
//! │  ──────────────────     ───────────────────      ──────────            │
//! │  "GTIN"             ──► gtin                     as-is                 │
//! │  "BATCH/LOT"        ──► batch_number             as-is                 │
//! │  "SERIAL"           ──► serial_number            as-is                 │
//! │  "USE BY OR EXPIRY" ──► expiry                   2025-06-15 →          │
//! │                                                  "15 - Jun - 2025"     │
//! │  anything else      ──► (ignored)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The list is walked once in order, so a repeated label keeps its last
//! value. An expiry that cannot be converted becomes `None`.

use tracing::{trace, warn};

use crate::expiry::{format_iso_date, DateFormat};
use crate::locale::MonthNames;
use crate::sanitize::sanitize_log_message;
use crate::types::{FieldLabel, ProductRecord, ScanField};

/// Field mapper with a configurable expiry display format.
#[derive(Debug, Clone, Default)]
pub struct FieldMapper {
    months: MonthNames,
    format: DateFormat,
}

impl FieldMapper {
    pub fn new(months: MonthNames, format: DateFormat) -> Self {
        FieldMapper { months, format }
    }

    pub fn months(&self) -> &MonthNames {
        &self.months
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.format
    }

    /// Builds a record from `fields`. Never fails.
    pub fn map(&self, fields: &[ScanField]) -> ProductRecord {
        let mut record = ProductRecord::default();

        for field in fields {
            match FieldLabel::from_label(&field.label) {
                Some(label) => *record.slot_mut(label) = Some(field.value.clone()),
                None => trace!(label = %sanitize_log_message(&field.label), "Ignoring scan field"),
            }
        }

        if let Some(iso) = record.expiry.take() {
            record.expiry = match format_iso_date(&iso, &self.format, &self.months) {
                Ok(display) => Some(display),
                Err(err) => {
                    warn!(
                        expiry = %sanitize_log_message(&iso),
                        error = %err,
                        "Dropping expiry that cannot be displayed"
                    );
                    None
                }
            };
        }

        record
    }
}

/// Maps `fields` with English month names and the default `DD - Mon - YYYY`
/// display format.
///
/// ## Example
/// ```rust
/// use leaflet_core::fields::parse_gs1_fields;
/// use leaflet_core::types::ScanField;
///
/// let record = parse_gs1_fields(&[
///     ScanField::new("GTIN", "00012345678905"),
///     ScanField::new("BATCH/LOT", "AB123"),
/// ]);
/// assert_eq!(record.gtin.as_deref(), Some("00012345678905"));
/// assert_eq!(record.batch_number.as_deref(), Some("AB123"));
/// assert_eq!(record.serial_number, None);
/// assert_eq!(record.expiry, None);
/// ```
pub fn parse_gs1_fields(fields: &[ScanField]) -> ProductRecord {
    FieldMapper::default().map(fields)
}
