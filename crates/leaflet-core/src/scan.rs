//! # Scan Parser
//!
//! Orchestrates one scan: interpreter first, then the field mapper.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         parse_gs1_code                                  │
//! │                                                                         │
//! │  raw payload                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ScanInterpreter::interpret ──── Err(e) ──► returned unchanged         │
//! │       │                                                                 │
//! │       ▼ Ok(fields)                                                      │
//! │  FieldMapper::map                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductRecord                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The interpreter is a capability, not a concrete dependency: anything that
//! implements [`ScanInterpreter`] can be plugged in, including test doubles.
//! [`Gs1Interpreter`](crate::interpret::Gs1Interpreter) is the default.

use tracing::debug;

use crate::fields::FieldMapper;
use crate::sanitize::sanitize_log_message;
use crate::types::{ProductRecord, ScanField};

// =============================================================================
// Interpreter Capability
// =============================================================================

/// Turns a raw scanned payload into an ordered list of labeled fields.
pub trait ScanInterpreter {
    /// The decoding failure. The scan parser hands it back untouched.
    type Error;

    fn interpret(&self, payload: &str) -> Result<Vec<ScanField>, Self::Error>;
}

impl<I: ScanInterpreter + ?Sized> ScanInterpreter for &I {
    type Error = I::Error;

    fn interpret(&self, payload: &str) -> Result<Vec<ScanField>, Self::Error> {
        (**self).interpret(payload)
    }
}

impl<I: ScanInterpreter + ?Sized> ScanInterpreter for Box<I> {
    type Error = I::Error;

    fn interpret(&self, payload: &str) -> Result<Vec<ScanField>, Self::Error> {
        (**self).interpret(payload)
    }
}

// =============================================================================
// Scan Parser
// =============================================================================

/// An interpreter paired with a field mapper.
#[derive(Debug, Clone, Default)]
pub struct ScanParser<I> {
    interpreter: I,
    mapper: FieldMapper,
}

impl<I: ScanInterpreter> ScanParser<I> {
    pub fn new(interpreter: I, mapper: FieldMapper) -> Self {
        ScanParser {
            interpreter,
            mapper,
        }
    }

    /// Interprets `payload` and maps the fields into a record.
    ///
    /// Interpreter errors are returned as-is.
    pub fn parse(&self, payload: &str) -> Result<ProductRecord, I::Error> {
        let fields = self.interpreter.interpret(payload)?;
        debug!(
            payload = %sanitize_log_message(payload),
            field_count = fields.len(),
            "Scan interpreted"
        );
        Ok(self.mapper.map(&fields))
    }
}

/// Parses one scan with the default field mapper.
///
/// ## Example
/// ```rust
/// use leaflet_core::interpret::Gs1Interpreter;
/// use leaflet_core::scan::parse_gs1_code;
///
/// let record = parse_gs1_code(&Gs1Interpreter::new(), "(01)09506000134352(17)250600(10)AB123").unwrap();
/// assert_eq!(record.gtin.as_deref(), Some("09506000134352"));
/// assert_eq!(record.expiry.as_deref(), Some("00 - Jun - 2025"));
/// assert_eq!(record.batch_number.as_deref(), Some("AB123"));
/// ```
pub fn parse_gs1_code<I>(interpreter: &I, payload: &str) -> Result<ProductRecord, I::Error>
where
    I: ScanInterpreter + ?Sized,
{
    ScanParser::new(interpreter, FieldMapper::default()).parse(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, PartialEq)]
    struct StubError(&'static str);

    /// Returns canned fields and remembers what it was asked to decode.
    struct StubInterpreter {
        result: Result<Vec<ScanField>, &'static str>,
        seen: RefCell<Vec<String>>,
    }

    impl StubInterpreter {
        fn ok(fields: Vec<ScanField>) -> Self {
            StubInterpreter {
                result: Ok(fields),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn failing(reason: &'static str) -> Self {
            StubInterpreter {
                result: Err(reason),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl ScanInterpreter for StubInterpreter {
        type Error = StubError;

        fn interpret(&self, payload: &str) -> Result<Vec<ScanField>, StubError> {
            self.seen.borrow_mut().push(payload.to_string());
            self.result.clone().map_err(StubError)
        }
    }

    #[test]
    fn test_delegates_to_mapper() {
        let stub = StubInterpreter::ok(vec![
            ScanField::new("GTIN", "00012345678905"),
            ScanField::new("USE BY OR EXPIRY", "2025-06-15"),
        ]);
        let record = parse_gs1_code(&stub, "raw-bytes").unwrap();

        assert_eq!(record.gtin.as_deref(), Some("00012345678905"));
        assert_eq!(record.expiry.as_deref(), Some("15 - Jun - 2025"));
        assert_eq!(stub.seen.borrow().as_slice(), ["raw-bytes".to_string()]);
    }

    #[test]
    fn test_interpreter_error_is_propagated_unchanged() {
        let stub = StubInterpreter::failing("bad symbol");
        let err = parse_gs1_code(&stub, "garbage").unwrap_err();
        assert_eq!(err, StubError("bad symbol"));
    }

    #[test]
    fn test_empty_field_list() {
        let stub = StubInterpreter::ok(Vec::new());
        let record = parse_gs1_code(&stub, "").unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn test_boxed_interpreter() {
        let boxed: Box<dyn ScanInterpreter<Error = StubError>> =
            Box::new(StubInterpreter::ok(vec![ScanField::new("SERIAL", "S1")]));
        let parser = ScanParser::new(boxed, FieldMapper::default());
        let record = parser.parse("x").unwrap();
        assert_eq!(record.serial_number.as_deref(), Some("S1"));
    }
}
