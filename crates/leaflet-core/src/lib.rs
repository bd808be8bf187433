//! # leaflet-core: GS1 Scan Interpretation for ePI Leaflets
//!
//! This crate turns what a barcode scanner reads off a medicine pack into
//! the product identity used to look up its electronic leaflet. It holds
//! the pure logic only: no files, no network, no scanner hardware.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Leaflet Scan Pipeline                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Scanner / camera decoder (outside)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ raw payload                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ leaflet-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   scan    │  │ interpret │  │  fields   │  │   gtin    │  │   │
//! │  │   │ScanParser │─►│ Gs1Interp │─►│FieldMapper│  │ Validator │  │   │
//! │  │   └───────────┘  └───────────┘  └─────┬─────┘  └───────────┘  │   │
//! │  │                                        │                        │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌─────▼─────┐                  │   │
//! │  │   │  locale   │  │ sanitize  │  │  expiry   │                  │   │
//! │  │   │MonthNames │  │ log-safe  │  │ checker   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ProductRecord + GtinValidation         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             apps/cli (leaflet) or any embedding app             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`gtin`] - GTIN check-digit validation
//! - [`expiry`] - Expiry normalization, expired checks, display formatting
//! - [`fields`] - Labeled fields → [`ProductRecord`]
//! - [`scan`] - Interpreter + mapper orchestration
//! - [`interpret`] - Default GS1 element string / Digital Link interpreter
//! - [`locale`] - Month name tables
//! - [`sanitize`] - Log-safe rendering of scanned text
//! - [`types`] - Shared record types
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use leaflet_core::{parse_gs1_code, validate_gtin, Gs1Interpreter};
//!
//! let record = parse_gs1_code(&Gs1Interpreter::new(), "(01)09506000134352(10)AB123").unwrap();
//! let gtin = record.gtin.as_deref().unwrap_or_default();
//!
//! assert!(validate_gtin(gtin).is_valid);
//! assert_eq!(record.batch_number.as_deref(), Some("AB123"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod expiry;
pub mod fields;
pub mod gtin;
pub mod interpret;
pub mod locale;
pub mod sanitize;
pub mod scan;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{DecodeError, ExpiryError, GtinError, GtinErrorCode, LocaleError};
pub use expiry::{
    convert_to_last_month_day, format_iso_date, get_date_for_display, get_expiry_time,
    is_expired, DateFormat, ExpiryChecker, ExpiryDate, ExpiryStatus, UnknownExpiryPolicy,
};
pub use fields::{parse_gs1_fields, FieldMapper};
pub use gtin::{compute_check_digit, validate_gtin, Gtin, GtinValidator};
pub use interpret::Gs1Interpreter;
pub use locale::{MonthNames, MonthStyle};
pub use scan::{parse_gs1_code, ScanInterpreter, ScanParser};
pub use types::*;
