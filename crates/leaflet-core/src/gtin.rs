//! # GTIN Check-Digit Validation
//!
//! Validates Global Trade Item Numbers with the GS1 modulo-10 algorithm.
//!
//! ## Validation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      GTIN Validation                                    │
//! │                                                                         │
//! │  "00012345678905"                                                       │
//! │       │                                                                 │
//! │       ├── empty / non-digit?      → gtin_wrong_chars                    │
//! │       │                                                                 │
//! │       ├── length not accepted?    → gtin_wrong_length  (default: 14)    │
//! │       │                                                                 │
//! │       ├── last digit ≠ computed?  → gtin_wrong_digit                    │
//! │       │                                                                 │
//! │       └── OK → "GTIN is valid"                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Check Digit
//! Walking right-to-left from the digit before the check digit, weights
//! alternate 3, 1, 3, 1, ... The check digit brings the weighted sum up to the
//! next multiple of ten.
//!
//! ```text
//!   0  0  0  1  2  3  4  5  6  7  8  9  0 │ 5
//!   3  1  3  1  3  1  3  1  3  1  3  1  3 │
//!   ─────────────────────────────────────
//!   sum = 85  →  90 - 85 = 5  ✓
//! ```
//!
//! ## Usage
//! ```rust
//! use leaflet_core::gtin::{validate_gtin, GtinValidator};
//!
//! assert!(validate_gtin("00012345678905").is_valid);
//!
//! // Only 14-digit GTINs are accepted unless configured otherwise
//! assert!(!validate_gtin("4006381333931").is_valid);
//! let all_lengths = GtinValidator::with_lengths(&[8, 12, 13, 14]);
//! assert!(all_lengths.validate("4006381333931").is_valid);
//! ```

use crate::error::GtinError;
use crate::types::GtinValidation;

/// GTIN lengths accepted by default.
///
/// Downstream systems rely on the 14-digit form today; shorter GS1 lengths
/// are opt-in through [`GtinValidator::with_lengths`].
pub const DEFAULT_GTIN_LENGTHS: &[usize] = &[14];

/// Every GTIN length defined by GS1 (GTIN-8, GTIN-12, GTIN-13, GTIN-14).
pub const GS1_GTIN_LENGTHS: &[usize] = &[8, 12, 13, 14];

// =============================================================================
// Check Digit
// =============================================================================

/// Computes the GS1 check digit for `body` (all digits except the check digit).
///
/// Returns `None` if `body` is empty or contains a non-digit.
///
/// ## Example
/// ```rust
/// use leaflet_core::gtin::compute_check_digit;
///
/// assert_eq!(compute_check_digit("0001234567890"), Some(5));
/// assert_eq!(compute_check_digit("12A"), None);
/// ```
pub fn compute_check_digit(body: &str) -> Option<u8> {
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let sum: u32 = body
        .bytes()
        .rev()
        .zip([3u32, 1].into_iter().cycle())
        .map(|(b, weight)| u32::from(b - b'0') * weight)
        .sum();

    // Round up to the next multiple of ten; an exact multiple gives 10 → 0
    let digit = (sum + 10) / 10 * 10 - sum;
    Some(if digit == 10 { 0 } else { digit as u8 })
}

// =============================================================================
// Gtin
// =============================================================================

/// A GTIN that passed check-digit validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Gtin(String);

impl Gtin {
    /// Parses a GTIN using the default (14-digit) rules.
    pub fn parse(value: &str) -> Result<Self, GtinError> {
        GtinValidator::default().parse(value)
    }

    /// The digits, check digit included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The trailing check digit.
    pub fn check_digit(&self) -> u8 {
        // Non-empty ASCII digits by construction
        self.0.as_bytes()[self.0.len() - 1] - b'0'
    }
}

impl std::fmt::Display for Gtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Gtin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Validator
// =============================================================================

/// GTIN validator with a configurable set of accepted lengths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GtinValidator {
    accepted_lengths: Vec<usize>,
}

impl Default for GtinValidator {
    fn default() -> Self {
        GtinValidator {
            accepted_lengths: DEFAULT_GTIN_LENGTHS.to_vec(),
        }
    }
}

impl GtinValidator {
    /// Creates a validator accepting the given lengths.
    ///
    /// Lengths are sorted and de-duplicated. Lengths below 2 cannot carry a
    /// check digit and are dropped; if nothing remains the default is used.
    pub fn with_lengths(lengths: &[usize]) -> Self {
        let mut accepted: Vec<usize> = lengths.iter().copied().filter(|&l| l >= 2).collect();
        accepted.sort_unstable();
        accepted.dedup();

        if accepted.is_empty() {
            return Self::default();
        }

        GtinValidator {
            accepted_lengths: accepted,
        }
    }

    /// The accepted lengths, ascending.
    pub fn accepted_lengths(&self) -> &[usize] {
        &self.accepted_lengths
    }

    /// Parses `value` into a [`Gtin`], or explains why it was rejected.
    pub fn parse(&self, value: &str) -> Result<Gtin, GtinError> {
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GtinError::WrongChars);
        }

        if !self.accepted_lengths.contains(&value.len()) {
            return Err(GtinError::WrongLength {
                accepted: self.describe_lengths(),
                actual: value.len(),
            });
        }

        let (body, last) = value.split_at(value.len() - 1);
        let actual = last.as_bytes()[0] - b'0';
        let expected = compute_check_digit(body).ok_or(GtinError::WrongChars)?;

        if actual != expected {
            return Err(GtinError::WrongDigit { expected, actual });
        }

        Ok(Gtin(value.to_string()))
    }

    /// Validates `value`, returning a result value rather than an error.
    pub fn validate(&self, value: &str) -> GtinValidation {
        self.parse(value).into()
    }

    /// "14", "13 or 14", "8, 12, 13 or 14"
    fn describe_lengths(&self) -> String {
        match self.accepted_lengths.split_last() {
            Some((last, [])) => last.to_string(),
            Some((last, rest)) => {
                let head: Vec<String> = rest.iter().map(|l| l.to_string()).collect();
                format!("{} or {}", head.join(", "), last)
            }
            None => String::new(),
        }
    }
}

/// Validates a 14-digit GTIN.
///
/// ## Example
/// ```rust
/// use leaflet_core::gtin::validate_gtin;
/// use leaflet_core::error::GtinErrorCode;
///
/// let result = validate_gtin("00012345678904");
/// assert!(!result.is_valid);
/// assert_eq!(result.error_code, Some(GtinErrorCode::WrongDigit));
/// assert_eq!(result.message, "Invalid GTIN. Last digit should be 5");
/// ```
pub fn validate_gtin(value: &str) -> GtinValidation {
    GtinValidator::default().validate(value)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GtinErrorCode;
    use proptest::prelude::*;

    #[test]
    fn test_compute_check_digit() {
        assert_eq!(compute_check_digit("0001234567890"), Some(5));
        assert_eq!(compute_check_digit("0950600013435"), Some(2));
        // EAN-13 body
        assert_eq!(compute_check_digit("400638133393"), Some(1));
        // Sum is already a multiple of ten
        assert_eq!(compute_check_digit("0000000000000"), Some(0));
        assert_eq!(compute_check_digit(""), None);
        assert_eq!(compute_check_digit("12 3"), None);
    }

    #[test]
    fn test_validate_gtin_valid() {
        let result = validate_gtin("00012345678905");
        assert!(result.is_valid);
        assert_eq!(result.message, "GTIN is valid");
        assert_eq!(result.error_code, None);

        assert!(validate_gtin("09506000134352").is_valid);
    }

    #[test]
    fn test_validate_gtin_wrong_chars() {
        for value in ["", "0001234567890A", "0001234567890.5", " 00012345678905", "-0012345678905"] {
            let result = validate_gtin(value);
            assert!(!result.is_valid, "{value:?} should be rejected");
            assert_eq!(result.error_code, Some(GtinErrorCode::WrongChars));
            assert_eq!(result.message, "GTIN should be a numeric value");
        }
    }

    #[test]
    fn test_validate_gtin_wrong_length() {
        // Valid GTIN-13, still rejected by default
        let result = validate_gtin("4006381333931");
        assert_eq!(result.error_code, Some(GtinErrorCode::WrongLength));
        assert_eq!(result.message, "GTIN length should be 14");

        let result = validate_gtin("000123456789050");
        assert_eq!(result.error_code, Some(GtinErrorCode::WrongLength));
    }

    #[test]
    fn test_validate_gtin_wrong_digit() {
        let result = validate_gtin("00012345678901");
        assert!(!result.is_valid);
        assert_eq!(result.error_code, Some(GtinErrorCode::WrongDigit));
        assert_eq!(result.message, "Invalid GTIN. Last digit should be 5");
    }

    #[test]
    fn test_validator_with_lengths() {
        let validator = GtinValidator::with_lengths(&[14, 8, 13, 12, 14]);
        assert_eq!(validator.accepted_lengths(), &[8, 12, 13, 14]);

        assert!(validator.validate("4006381333931").is_valid); // GTIN-13
        assert!(validator.validate("96385074").is_valid); // GTIN-8
        assert!(validator.validate("036000291452").is_valid); // GTIN-12

        let result = validator.validate("123456789");
        assert_eq!(result.message, "GTIN length should be 8, 12, 13 or 14");

        let pair = GtinValidator::with_lengths(&[13, 14]);
        assert_eq!(
            pair.validate("123").message,
            "GTIN length should be 13 or 14"
        );
    }

    #[test]
    fn test_validator_with_no_usable_lengths_falls_back() {
        assert_eq!(GtinValidator::with_lengths(&[]), GtinValidator::default());
        assert_eq!(GtinValidator::with_lengths(&[0, 1]), GtinValidator::default());
    }

    #[test]
    fn test_gtin_parse() {
        let gtin = Gtin::parse("09506000134352").unwrap();
        assert_eq!(gtin.as_str(), "09506000134352");
        assert_eq!(gtin.check_digit(), 2);
        assert_eq!(gtin.to_string(), "09506000134352");

        let err = Gtin::parse("09506000134353").unwrap_err();
        assert_eq!(
            err,
            GtinError::WrongDigit {
                expected: 2,
                actual: 3
            }
        );
    }

    proptest! {
        #[test]
        fn prop_computed_check_digit_validates(body in "[0-9]{13}") {
            let digit = compute_check_digit(&body).unwrap();
            let gtin = format!("{body}{digit}");
            prop_assert!(validate_gtin(&gtin).is_valid);
        }

        #[test]
        fn prop_any_other_last_digit_is_rejected(body in "[0-9]{13}", offset in 1u8..10) {
            let digit = compute_check_digit(&body).unwrap();
            let wrong = (digit + offset) % 10;
            let result = validate_gtin(&format!("{body}{wrong}"));
            prop_assert_eq!(result.error_code, Some(GtinErrorCode::WrongDigit));
        }

        #[test]
        fn prop_wrong_length_digit_strings(value in "[0-9]{1,30}") {
            prop_assume!(value.len() != 14);
            let result = validate_gtin(&value);
            prop_assert_eq!(result.error_code, Some(GtinErrorCode::WrongLength));
        }

        #[test]
        fn prop_non_digit_is_wrong_chars(
            prefix in "[0-9]{0,7}",
            bad in "[^0-9]",
            suffix in "[0-9]{0,7}",
        ) {
            let result = validate_gtin(&format!("{prefix}{bad}{suffix}"));
            prop_assert_eq!(result.error_code, Some(GtinErrorCode::WrongChars));
        }
    }
}
