//! # Command Handlers
//!
//! Each handler writes its result to `out` and returns the process exit
//! code. Writers and the clock are parameters so handlers run unchanged in
//! tests.
//!
//! ## Output
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  parse PAYLOAD   pretty JSON ScanReport      exit 1 on decode error    │
//! │  parse (stdin)   one JSON line per payload   exit 1 if any failed      │
//! │  gtin VALUE      pretty JSON GtinValidation  exit 1 when invalid       │
//! │  expiry VALUE    pretty JSON ExpiryReport    exit 0                    │
//! │  format-date     plain text                  exit 1 on bad date        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};

use chrono::Local;
use leaflet_core::expiry::format_iso_date;
use leaflet_core::sanitize::sanitize_log_message;
use leaflet_core::{
    DateFormat, DecodeError, ExpiryChecker, ExpiryStatus, Gs1Interpreter, GtinValidation,
    GtinValidator, MonthStyle, ProductRecord, ScanParser,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::{ExpiryArgs, FormatDateArgs, GtinArgs, ParseArgs};
use crate::config::AppConfig;
use crate::error::CliResult;

// =============================================================================
// Reports
// =============================================================================

/// A scan's record plus what the pipeline concluded about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    #[serde(flatten)]
    pub record: ProductRecord,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtin_validation: Option<GtinValidation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_status: Option<ExpiryStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryReport {
    pub input: String,

    /// The calendar date checked against, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_date: Option<String>,

    pub day_known: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(flatten)]
    pub status: ExpiryStatus,

    pub expired: bool,
}

/// One failed line in stdin mode.
#[derive(Debug, Serialize)]
struct ScanFailure {
    error: String,
}

// =============================================================================
// Context
// =============================================================================

/// Core components built once from the configuration.
#[derive(Debug, Clone)]
pub struct Context {
    parser: ScanParser<Gs1Interpreter>,
    validator: GtinValidator,
    checker: ExpiryChecker,
    format: DateFormat,
}

impl Context {
    pub fn from_config(config: &AppConfig) -> CliResult<Self> {
        Ok(Context {
            parser: ScanParser::new(Gs1Interpreter::new(), config.field_mapper()?),
            validator: config.gtin_validator(),
            checker: config.expiry_checker()?,
            format: config.date_format(),
        })
    }

    /// Interprets one payload and evaluates it at `now_millis`.
    pub fn scan_report(&self, payload: &str, now_millis: i64) -> Result<ScanReport, DecodeError> {
        let record = self.parser.parse(payload)?;

        let gtin_validation = record
            .gtin
            .as_deref()
            .map(|gtin| self.validator.validate(gtin));

        let expiry_status = record
            .expiry
            .as_deref()
            .map(|expiry| self.checker.status_at(expiry, &Local, now_millis));

        Ok(ScanReport {
            record,
            gtin_validation,
            expired: expiry_status.map(|status| self.checker.is_expired_status(status)),
            expiry_status,
        })
    }

    pub fn expiry_report(&self, value: &str, now_millis: i64) -> ExpiryReport {
        let resolved = self.checker.resolve(value);
        let status = self.checker.status_at(value, &Local, now_millis);

        ExpiryReport {
            input: value.to_string(),
            resolved_date: resolved.map(|date| date.date().to_string()),
            day_known: resolved.is_some_and(|date| date.is_day_known()),
            display: resolved.map(|date| date.display(&self.format, self.checker.months())),
            expired: self.checker.is_expired_status(status),
            status,
        }
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// =============================================================================
// Handlers
// =============================================================================

pub fn run_parse<R: BufRead, W: Write>(
    ctx: &Context,
    args: &ParseArgs,
    input: R,
    mut out: W,
) -> CliResult<i32> {
    if let Some(payload) = &args.payload {
        let report = ctx.scan_report(payload, now_millis())?;
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
        return Ok(0);
    }

    let mut failures = 0usize;
    let mut total = 0usize;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        total += 1;

        match ctx.scan_report(&line, now_millis()) {
            Ok(report) => serde_json::to_writer(&mut out, &report)?,
            Err(err) => {
                failures += 1;
                warn!(payload = %sanitize_log_message(&line), error = %err, "Scan could not be decoded");
                serde_json::to_writer(
                    &mut out,
                    &ScanFailure {
                        error: err.to_string(),
                    },
                )?;
            }
        }
        writeln!(out)?;
    }

    info!(total, failures, "Processed scans from stdin");
    Ok(if failures > 0 { 1 } else { 0 })
}

pub fn run_gtin<W: Write>(ctx: &Context, args: &GtinArgs, mut out: W) -> CliResult<i32> {
    let validation = ctx.validator.validate(&args.value);
    serde_json::to_writer_pretty(&mut out, &validation)?;
    writeln!(out)?;
    Ok(if validation.is_valid { 0 } else { 1 })
}

pub fn run_expiry<W: Write>(ctx: &Context, args: &ExpiryArgs, mut out: W) -> CliResult<i32> {
    let report = ctx.expiry_report(&args.value, now_millis());
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    Ok(0)
}

pub fn run_format_date<W: Write>(
    ctx: &Context,
    args: &FormatDateArgs,
    mut out: W,
) -> CliResult<i32> {
    let mut format = ctx.format.clone();
    if args.full {
        format.month_style = MonthStyle::Full;
    }
    if let Some(separator) = &args.separator {
        format.separator = separator.clone();
    }

    let display = format_iso_date(&args.date, &format, ctx.checker.months())?;
    writeln!(out, "{display}")?;
    Ok(0)
}
