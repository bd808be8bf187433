//! # GS1 Element String Interpreter
//!
//! The default [`ScanInterpreter`]: reads the text a scanner hands over and
//! splits it into labeled application-identifier (AI) fields.
//!
//! ## Supported Payloads
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Payload Detection                                  │
//! │                                                                         │
//! │  "https://id.gs1.org/01/0950.../10/AB1?17=250600"                      │
//! │       └──► GS1 Digital Link: path pairs, then numeric query keys       │
//! │                                                                         │
//! │  "(01)09506000134352(17)250600(10)AB123"                               │
//! │       └──► Bracketed human-readable form                               │
//! │                                                                         │
//! │  "]d2" "0109506000134352" "17250600" "10AB123" <GS> "21XYZ"            │
//! │       └──► Raw element string (symbology identifier optional).         │
//! │            Variable-length values end at <GS> or end of input.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Date AIs are emitted as ISO `YYYY-MM-DD` with the day copied through, so
//! `250600` becomes `2025-06-00`. Check digits are *not* verified here; that
//! is [`validate_gtin`](crate::gtin::validate_gtin)'s job.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{DecodeError, DecodeResult};
use crate::sanitize::GROUP_SEPARATOR;
use crate::scan::ScanInterpreter;
use crate::types::ScanField;

// =============================================================================
// AI Table
// =============================================================================

/// Length rule for an AI's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiLength {
    Fixed(usize),
    /// Up to this many characters, terminated by `<GS>` or end of input.
    Variable(usize),
}

/// Character rule for an AI's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiFormat {
    Numeric,
    /// GS1 AI encodable character set 82.
    Alphanumeric,
    /// `YYMMDD`, day `00` allowed.
    Date,
}

/// One application identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiDefinition {
    pub ai: &'static str,
    pub label: &'static str,
    pub length: AiLength,
    pub format: AiFormat,
}

const fn ai(ai: &'static str, label: &'static str, length: AiLength, format: AiFormat) -> AiDefinition {
    AiDefinition {
        ai,
        label,
        length,
        format,
    }
}

use AiFormat::{Alphanumeric, Date, Numeric};
use AiLength::{Fixed, Variable};

/// Application identifiers understood by [`Gs1Interpreter`].
pub const AI_TABLE: &[AiDefinition] = &[
    ai("00", "SSCC", Fixed(18), Numeric),
    ai("01", "GTIN", Fixed(14), Numeric),
    ai("02", "CONTENT", Fixed(14), Numeric),
    ai("10", "BATCH/LOT", Variable(20), Alphanumeric),
    ai("11", "PROD DATE", Fixed(6), Date),
    ai("12", "DUE DATE", Fixed(6), Date),
    ai("13", "PACK DATE", Fixed(6), Date),
    ai("15", "BEST BEFORE or BEST BY", Fixed(6), Date),
    ai("16", "SELL BY", Fixed(6), Date),
    ai("17", "USE BY OR EXPIRY", Fixed(6), Date),
    ai("20", "VARIANT", Fixed(2), Numeric),
    ai("21", "SERIAL", Variable(20), Alphanumeric),
    ai("22", "CPV", Variable(20), Alphanumeric),
    ai("30", "VAR. COUNT", Variable(8), Numeric),
    ai("37", "COUNT", Variable(8), Numeric),
    ai("240", "ADDITIONAL ID", Variable(30), Alphanumeric),
    ai("241", "CUST. PART No.", Variable(30), Alphanumeric),
    ai("242", "MTO VARIANT", Variable(6), Numeric),
    ai("243", "PCN", Variable(20), Alphanumeric),
    ai("250", "SECONDARY SERIAL", Variable(30), Alphanumeric),
    ai("251", "REF. TO SOURCE", Variable(30), Alphanumeric),
    ai("254", "GLN EXTENSION COMPONENT", Variable(20), Alphanumeric),
    ai("400", "ORDER NUMBER", Variable(30), Alphanumeric),
    ai("410", "SHIP TO LOC", Fixed(13), Numeric),
    ai("414", "LOC No.", Fixed(13), Numeric),
    ai("710", "NHRN PZN", Variable(20), Alphanumeric),
    ai("711", "NHRN CIP", Variable(20), Alphanumeric),
    ai("712", "NHRN CN", Variable(20), Alphanumeric),
    ai("713", "NHRN DRN", Variable(20), Alphanumeric),
    ai("714", "NHRN AIM", Variable(20), Alphanumeric),
    ai("715", "NHRN NDC", Variable(20), Alphanumeric),
    ai("7003", "EXPIRY TIME", Fixed(10), Numeric),
    ai("8006", "ITIP", Fixed(18), Numeric),
    ai("8020", "REF No.", Variable(25), Alphanumeric),
];

/// Digital Link primary keys; path pairs start at the first of these.
const PRIMARY_KEYS: &[&str] = &["01", "00", "8006", "414"];

/// Looks up an AI by its exact code.
pub fn find_ai(code: &str) -> Option<&'static AiDefinition> {
    AI_TABLE.iter().find(|def| def.ai == code)
}

/// Finds the AI at the start of `data`. AIs are prefix-free, so the first
/// match is the only one.
fn match_ai(data: &str) -> Option<&'static AiDefinition> {
    (2..=4)
        .filter_map(|n| data.get(..n))
        .filter(|code| code.bytes().all(|b| b.is_ascii_digit()))
        .find_map(find_ai)
}

impl AiDefinition {
    /// Validates `value` against this AI and builds the labeled field.
    pub fn field(&self, value: &str) -> DecodeResult<ScanField> {
        let count = value.chars().count();
        if count == 0 {
            return Err(DecodeError::MissingValue {
                ai: self.ai.to_string(),
            });
        }

        match self.length {
            Fixed(expected) if count != expected => {
                return Err(DecodeError::WrongLength {
                    ai: self.ai.to_string(),
                    expected,
                    actual: count,
                });
            }
            Variable(max) if count > max => {
                return Err(DecodeError::TooLong {
                    ai: self.ai.to_string(),
                    max,
                    actual: count,
                });
            }
            _ => {}
        }

        let value = match self.format {
            Numeric => {
                self.require(value.bytes().all(|b| b.is_ascii_digit()), "must be numeric")?;
                value.to_string()
            }
            Alphanumeric => {
                self.require(value.chars().all(is_cset82), "contains characters outside GS1 set 82")?;
                value.to_string()
            }
            Date => self.iso_date(value)?,
        };

        Ok(ScanField::new(self.label, value))
    }

    /// `YYMMDD` → `20YY-MM-DD`
    fn iso_date(&self, value: &str) -> DecodeResult<String> {
        self.require(value.bytes().all(|b| b.is_ascii_digit()), "date must be numeric YYMMDD")?;

        let (yy, rest) = value.split_at(2);
        let (mm, dd) = rest.split_at(2);
        let month: u32 = mm.parse().unwrap_or(0);
        let day: u32 = dd.parse().unwrap_or(99);

        self.require((1..=12).contains(&month), "month must be 01-12")?;
        self.require(day <= 31, "day must be 00-31")?;

        Ok(format!("20{yy}-{mm}-{dd}"))
    }

    fn require(&self, ok: bool, reason: &str) -> DecodeResult<()> {
        if ok {
            Ok(())
        } else {
            Err(DecodeError::InvalidValue {
                ai: self.ai.to_string(),
                reason: reason.to_string(),
            })
        }
    }
}

/// GS1 AI encodable character set 82.
fn is_cset82(c: char) -> bool {
    matches!(c,
        '!' | '"' | '%' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | '-' | '.' | '/'
        | '0'..='9' | ':' | ';' | '<' | '=' | '>' | '?' | 'A'..='Z' | '_' | 'a'..='z')
}

/// The first `n` characters of `s` (or all of it).
fn prefix_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((index, _)) => &s[..index],
        None => s,
    }
}

// =============================================================================
// Interpreter
// =============================================================================

/// Interprets bracketed, raw and Digital Link GS1 payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gs1Interpreter;

impl Gs1Interpreter {
    pub fn new() -> Self {
        Gs1Interpreter
    }

    /// Splits `payload` into labeled fields, in payload order.
    pub fn interpret_payload(&self, payload: &str) -> DecodeResult<Vec<ScanField>> {
        let payload = payload.trim();

        if payload.starts_with("https://") || payload.starts_with("http://") {
            return self.parse_digital_link(payload);
        }

        let data = strip_symbology_id(payload).trim_start_matches(GROUP_SEPARATOR);
        if data.is_empty() {
            return Err(DecodeError::EmptyPayload);
        }

        if data.starts_with('(') {
            self.parse_bracketed(data)
        } else {
            self.parse_element_string(data)
        }
    }

    fn parse_element_string(&self, data: &str) -> DecodeResult<Vec<ScanField>> {
        let mut fields = Vec::new();
        let mut pos = 0;

        while pos < data.len() {
            let rest = &data[pos..];
            if rest.starts_with(GROUP_SEPARATOR) {
                pos += GROUP_SEPARATOR.len_utf8();
                continue;
            }

            let def = match_ai(rest).ok_or_else(|| DecodeError::UnknownAi {
                position: pos,
                found: rest.chars().take(4).collect(),
            })?;

            let after_ai = &rest[def.ai.len()..];
            let segment = &after_ai[..after_ai.find(GROUP_SEPARATOR).unwrap_or(after_ai.len())];
            let value = match def.length {
                Fixed(n) => prefix_chars(segment, n),
                Variable(_) => segment,
            };

            fields.push(def.field(value)?);
            pos += def.ai.len() + value.len();
        }

        Ok(fields)
    }

    fn parse_bracketed(&self, data: &str) -> DecodeResult<Vec<ScanField>> {
        let mut fields = Vec::new();
        let mut rest = data;

        while !rest.is_empty() {
            let position = data.len() - rest.len();
            let inner = rest.strip_prefix('(').ok_or_else(|| {
                DecodeError::MalformedBrackets(format!("expected '(' at position {position}"))
            })?;
            let close = inner.find(')').ok_or_else(|| {
                DecodeError::MalformedBrackets(format!("unclosed '(' at position {position}"))
            })?;

            let code = &inner[..close];
            let def = find_ai(code).ok_or_else(|| DecodeError::UnknownAi {
                position,
                found: code.to_string(),
            })?;

            let after = &inner[close + 1..];
            let end = after.find('(').unwrap_or(after.len());
            fields.push(def.field(after[..end].trim_end_matches(GROUP_SEPARATOR))?);
            rest = &after[end..];
        }

        Ok(fields)
    }

    fn parse_digital_link(&self, payload: &str) -> DecodeResult<Vec<ScanField>> {
        let url = Url::parse(payload).map_err(|e| DecodeError::InvalidDigitalLink(e.to_string()))?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        let start = segments
            .iter()
            .position(|s| PRIMARY_KEYS.contains(s))
            .ok_or_else(|| DecodeError::InvalidDigitalLink("no primary key in path".to_string()))?;

        let mut fields = Vec::new();

        for (index, pair) in segments[start..].chunks(2).enumerate() {
            let def = find_ai(pair[0]).ok_or_else(|| DecodeError::UnknownAi {
                position: start + index * 2,
                found: pair[0].to_string(),
            })?;
            let raw = pair.get(1).ok_or_else(|| DecodeError::MissingValue {
                ai: def.ai.to_string(),
            })?;
            let value = decode_component(raw)?;
            fields.push(def.field(&pad_gtin(def, &value))?);
        }

        // Data attributes may also travel as query parameters; non-AI keys
        // such as `linkType` are not ours to interpret. `+` is a GS1 value
        // character here, not an encoded space.
        let query = url.query().unwrap_or_default();
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
            if let Some(def) = find_ai(&decode_component(key)?) {
                fields.push(def.field(&decode_component(raw)?)?);
            }
        }

        Ok(fields)
    }
}

impl ScanInterpreter for Gs1Interpreter {
    type Error = DecodeError;

    fn interpret(&self, payload: &str) -> DecodeResult<Vec<ScanField>> {
        self.interpret_payload(payload)
    }
}

/// Percent-decodes one Digital Link path segment or query component.
fn decode_component(raw: &str) -> DecodeResult<Cow<'_, str>> {
    percent_decode_str(raw)
        .decode_utf8()
        .map_err(|e| DecodeError::InvalidDigitalLink(e.to_string()))
}

/// Drops a leading symbology identifier such as `]d2`, `]C1` or `]Q3`.
fn strip_symbology_id(payload: &str) -> &str {
    match payload.strip_prefix(']') {
        Some(rest) => rest.get(2..).unwrap_or(""),
        None => payload,
    }
}

/// Digital Link carries GTIN-8/12/13 unpadded; the element string form is
/// always 14 digits.
fn pad_gtin(def: &AiDefinition, value: &str) -> String {
    if def.ai == "01" && matches!(value.len(), 8 | 12 | 13) {
        format!("{value:0>14}")
    } else {
        value.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
