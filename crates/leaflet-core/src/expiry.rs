//! # Expiry Normalization
//!
//! Turns scanned expiry dates into end-of-day timestamps and display strings.
//!
//! ## The "day 00" Convention
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GS1 allows the day of an expiry date to be "00": the pack expires at  │
//! │  the end of that month.                                                │
//! │                                                                         │
//! │    "250600"  ──► day 00 ──► 2025-06-01 ──► +1 month ──► 2025-07-01     │
//! │                                                        ──► -1 day      │
//! │                                                        ──► 2025-06-30  │
//! │                                                                         │
//! │    "250615"  ──► 2025-06-15                                            │
//! │                                                                         │
//! │  Either way the instant used is 23:59:59.999 local time of that day.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Accepted Layouts (any run of non-alphanumerics separates)
//! | Layout          | Example           | Source                        |
//! |-----------------|-------------------|-------------------------------|
//! | `YYMMDD`        | `250600`          | AI (17) raw value             |
//! | `YYYY-MM-DD`    | `2025-06-00`      | interpreter output            |
//! | `DD-Mon-YYYY`   | `15 - Jun - 2025` | field mapper display form     |
//! | `Mon-YYYY`      | `Jun - 2025`      | display form, day unknown     |
//!
//! ## Failure Policy
//! A date that cannot be normalized is *unknown*, never *expired*:
//! [`get_expiry_time`] returns `None` and [`is_expired`] returns `false`.
//! Deployments that must refuse unknown expiry dates use
//! [`ExpiryChecker`] with [`UnknownExpiryPolicy::FailClosed`].

use std::str::FromStr;

use chrono::{DateTime, Local, Months, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{ExpiryError, ExpiryResult, UnknownPolicyError};
use crate::locale::{MonthNames, MonthStyle};
use crate::sanitize::sanitize_log_message;

/// Separator used between day, month and year in display dates.
pub const DEFAULT_DATE_SEPARATOR: &str = "-";

// =============================================================================
// Expiry Date
// =============================================================================

/// A resolved expiry day.
///
/// When the scanned day was `00`, `date` is the last day of the month and
/// `day_known` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpiryDate {
    date: NaiveDate,
    day_known: bool,
}

impl ExpiryDate {
    /// Parses an expiry date using English month names.
    pub fn parse(raw: &str) -> ExpiryResult<Self> {
        Self::parse_with(raw, &MonthNames::english())
    }

    /// Parses an expiry date, reading month names from `months`.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use leaflet_core::expiry::ExpiryDate;
    ///
    /// let expiry = ExpiryDate::parse("250600").unwrap();
    /// assert_eq!(expiry.date(), NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
    /// assert!(!expiry.is_day_known());
    ///
    /// let expiry = ExpiryDate::parse("15 - Jun - 2025").unwrap();
    /// assert_eq!(expiry.date(), NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
    /// ```
    pub fn parse_with(raw: &str, months: &MonthNames) -> ExpiryResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ExpiryError::Empty);
        }

        // Whitespace separates like any other punctuation, so an empty or
        // blank display separator still leaves day, month and year apart.
        let parts: Vec<&str> = raw
            .split(|c: char| !c.is_alphanumeric())
            .filter(|part| !part.is_empty())
            .collect();
        let packed = parts.concat();

        let (year, month, day) = match parts.as_slice() {
            // YYMMDD, possibly spaced out as "25 06 15"
            _ if packed.len() == 6 && is_digits(&packed) => {
                let year = 2000 + year_number(&packed[0..2])?;
                (year, number("month", &packed[2..4])?, number("day", &packed[4..6])?)
            }
            // YYYY-MM-DD
            [year, month, day] if year.len() == 4 && is_digits(year) => (
                year_number(year)?,
                number("month", month)?,
                number("day", day)?,
            ),
            // DD-Mon-YYYY
            [day, month, year] if is_digits(day) && !is_digits(month) => (
                year_number(year)?,
                month_number(month, months)?,
                number("day", day)?,
            ),
            // Mon-YYYY
            [month, year] if !is_digits(month) => {
                (year_number(year)?, month_number(month, months)?, 0)
            }
            _ => return Err(ExpiryError::UnrecognizedFormat(raw.to_string())),
        };

        Self::from_parts(year, month, day)
    }

    /// Resolves a year, month and day, where day `0` means "last day of the
    /// month".
    pub fn from_parts(year: i32, month: u32, day: u32) -> ExpiryResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(ExpiryError::MonthOutOfRange(month));
        }

        if day == 0 {
            return Ok(ExpiryDate {
                date: last_day_of_month(year, month)?,
                day_known: false,
            });
        }

        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(ExpiryError::InvalidDate { year, month, day })?;

        Ok(ExpiryDate {
            date,
            day_known: true,
        })
    }

    /// The resolved calendar day.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// False when the scan used day `00`.
    pub fn is_day_known(&self) -> bool {
        self.day_known
    }

    /// Moves to the last day of the same month.
    pub fn to_end_of_month(self) -> ExpiryResult<Self> {
        use chrono::Datelike;

        Ok(ExpiryDate {
            date: last_day_of_month(self.date.year(), self.date.month())?,
            day_known: self.day_known,
        })
    }

    /// The last instant (23:59:59.999) of the day in `tz`.
    pub fn end_of_day<Tz: TimeZone>(&self, tz: &Tz) -> ExpiryResult<DateTime<Tz>> {
        self.date
            .and_hms_milli_opt(23, 59, 59, 999)
            .and_then(|local| tz.from_local_datetime(&local).earliest())
            .ok_or(ExpiryError::NoTimestamp(self.date))
    }

    /// Epoch milliseconds of [`end_of_day`](Self::end_of_day).
    ///
    /// Instants at or before the Unix epoch are rejected.
    pub fn timestamp_millis<Tz: TimeZone>(&self, tz: &Tz) -> ExpiryResult<i64> {
        let millis = self.end_of_day(tz)?.timestamp_millis();
        if millis <= 0 {
            return Err(ExpiryError::NoTimestamp(self.date));
        }
        Ok(millis)
    }

    /// Display form: `"15 - Jun - 2025"`, or `"Jun - 2025"` when the day is
    /// unknown.
    pub fn display(&self, format: &DateFormat, months: &MonthNames) -> String {
        use chrono::Datelike;

        let sep = &format.separator;
        let month = months
            .name(self.date.month(), format.month_style)
            .unwrap_or_default();

        if self.day_known {
            format!("{:02} {sep} {month} {sep} {}", self.date.day(), self.date.year())
        } else {
            format!("{month} {sep} {}", self.date.year())
        }
    }
}

/// First day of the month, plus one month, minus one day.
fn last_day_of_month(year: i32, month: u32) -> ExpiryResult<NaiveDate> {
    let invalid = ExpiryError::InvalidDate {
        year,
        month,
        day: 1,
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .ok_or(invalid)
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn number(part: &'static str, value: &str) -> ExpiryResult<u32> {
    let not_numeric = || ExpiryError::NotNumeric {
        part,
        value: value.to_string(),
    };
    if !is_digits(value) {
        return Err(not_numeric());
    }
    value.parse().map_err(|_| not_numeric())
}

fn year_number(value: &str) -> ExpiryResult<i32> {
    i32::try_from(number("year", value)?).map_err(|_| ExpiryError::NotNumeric {
        part: "year",
        value: value.to_string(),
    })
}

fn month_number(name: &str, months: &MonthNames) -> ExpiryResult<u32> {
    months
        .lookup(name)
        .ok_or_else(|| ExpiryError::UnknownMonth(name.to_string()))
}

// =============================================================================
// Display Format
// =============================================================================

/// How a display date is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pub month_style: MonthStyle,
    pub separator: String,
}

impl Default for DateFormat {
    fn default() -> Self {
        DateFormat {
            month_style: MonthStyle::Abbreviated,
            separator: DEFAULT_DATE_SEPARATOR.to_string(),
        }
    }
}

impl DateFormat {
    pub fn new(use_full_month_name: bool, separator: Option<&str>) -> Self {
        DateFormat {
            month_style: MonthStyle::from_full_flag(use_full_month_name),
            separator: separator.unwrap_or(DEFAULT_DATE_SEPARATOR).to_string(),
        }
    }
}

/// Converts `YYYY-MM-DD` into `DD <sep> Month <sep> YYYY`.
///
/// The day is copied through unchanged, so `"2025-06-00"` becomes
/// `"00 - Jun - 2025"` and keeps its "unknown day" meaning.
///
/// ## Example
/// ```rust
/// use leaflet_core::expiry::{format_iso_date, DateFormat};
/// use leaflet_core::locale::MonthNames;
///
/// let months = MonthNames::english();
/// let slash = DateFormat::new(false, Some("/"));
/// assert_eq!(format_iso_date("2025-06-15", &slash, &months).unwrap(), "15 / Jun / 2025");
///
/// let full = DateFormat::new(true, Some("/"));
/// assert_eq!(format_iso_date("2025-06-15", &full, &months).unwrap(), "15 / June / 2025");
/// ```
pub fn format_iso_date(
    date: &str,
    format: &DateFormat,
    months: &MonthNames,
) -> ExpiryResult<String> {
    let parts: Vec<&str> = date.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(ExpiryError::UnrecognizedFormat(date.to_string()));
    };

    if !is_digits(year) {
        return Err(ExpiryError::NotNumeric {
            part: "year",
            value: year.to_string(),
        });
    }
    if !is_digits(day) {
        return Err(ExpiryError::NotNumeric {
            part: "day",
            value: day.to_string(),
        });
    }

    let month = number("month", month)?;
    let name = months
        .name(month, format.month_style)
        .ok_or(ExpiryError::MonthOutOfRange(month))?;

    let sep = &format.separator;
    Ok(format!("{day} {sep} {name} {sep} {year}"))
}

/// [`format_iso_date`] with English month names.
pub fn convert_from_iso(
    date: &str,
    use_full_month_name: bool,
    separator: Option<&str>,
) -> ExpiryResult<String> {
    format_iso_date(
        date,
        &DateFormat::new(use_full_month_name, separator),
        &MonthNames::english(),
    )
}

/// Drops an unknown (`00`) day from a display date.
///
/// `"00 - Jun - 2025"` becomes `"Jun - 2025"`; anything else is returned
/// unchanged.
pub fn get_date_for_display(date: &str) -> &str {
    match date.strip_prefix("00") {
        Some(rest) => rest.trim_start_matches(|c: char| !c.is_alphanumeric()),
        None => date,
    }
}

// =============================================================================
// Expiry Status
// =============================================================================

/// What a caller may conclude about an expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExpiryStatus {
    NotExpired {
        #[serde(rename = "expiresAt")]
        #[ts(type = "number")]
        expires_at: i64,
    },
    Expired {
        #[serde(rename = "expiresAt")]
        #[ts(type = "number")]
        expires_at: i64,
    },
    /// The date could not be normalized.
    Unknown,
}

impl ExpiryStatus {
    /// The end-of-day timestamp, when known.
    pub fn expires_at(&self) -> Option<i64> {
        match self {
            ExpiryStatus::NotExpired { expires_at } | ExpiryStatus::Expired { expires_at } => {
                Some(*expires_at)
            }
            ExpiryStatus::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, ExpiryStatus::Unknown)
    }
}

/// How an unknown expiry date is treated by [`ExpiryChecker::is_expired`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownExpiryPolicy {
    /// Unknown means "not expired" (availability first).
    #[default]
    FailOpen,
    /// Unknown means "expired".
    FailClosed,
}

impl std::fmt::Display for UnknownExpiryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnknownExpiryPolicy::FailOpen => write!(f, "fail_open"),
            UnknownExpiryPolicy::FailClosed => write!(f, "fail_closed"),
        }
    }
}

impl FromStr for UnknownExpiryPolicy {
    type Err = UnknownPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "fail_open" | "open" => Ok(UnknownExpiryPolicy::FailOpen),
            "fail_closed" | "closed" => Ok(UnknownExpiryPolicy::FailClosed),
            _ => Err(UnknownPolicyError(s.to_string())),
        }
    }
}

// =============================================================================
// Expiry Checker
// =============================================================================

/// Expiry evaluation with an injected month table and unknown-date policy.
#[derive(Debug, Clone, Default)]
pub struct ExpiryChecker {
    months: MonthNames,
    policy: UnknownExpiryPolicy,
}

impl ExpiryChecker {
    pub fn new(months: MonthNames, policy: UnknownExpiryPolicy) -> Self {
        ExpiryChecker { months, policy }
    }

    pub fn months(&self) -> &MonthNames {
        &self.months
    }

    pub fn policy(&self) -> UnknownExpiryPolicy {
        self.policy
    }

    /// Parses `expiry`, logging (not propagating) the reason on failure.
    pub fn resolve(&self, expiry: &str) -> Option<ExpiryDate> {
        match ExpiryDate::parse_with(expiry, &self.months) {
            Ok(date) => Some(date),
            Err(err) => {
                debug!(
                    expiry = %sanitize_log_message(expiry),
                    error = %err,
                    "Expiry date could not be normalized"
                );
                None
            }
        }
    }

    /// End-of-day epoch milliseconds in `tz`, or `None` if unknown.
    pub fn expiry_time_in<Tz: TimeZone>(&self, expiry: &str, tz: &Tz) -> Option<i64> {
        let date = self.resolve(expiry)?;
        match date.timestamp_millis(tz) {
            Ok(millis) => Some(millis),
            Err(err) => {
                debug!(
                    expiry = %sanitize_log_message(expiry),
                    error = %err,
                    "Expiry date has no usable timestamp"
                );
                None
            }
        }
    }

    /// Status of `expiry` at `now_millis`, in time zone `tz`.
    ///
    /// A date expires once `now` reaches its end-of-day instant.
    pub fn status_at<Tz: TimeZone>(&self, expiry: &str, tz: &Tz, now_millis: i64) -> ExpiryStatus {
        match self.expiry_time_in(expiry, tz) {
            Some(expires_at) if expires_at <= now_millis => ExpiryStatus::Expired { expires_at },
            Some(expires_at) => ExpiryStatus::NotExpired { expires_at },
            None => ExpiryStatus::Unknown,
        }
    }

    /// Status of `expiry` now, in local time.
    pub fn status(&self, expiry: &str) -> ExpiryStatus {
        self.status_at(expiry, &Local, Utc::now().timestamp_millis())
    }

    /// Applies the unknown-date policy to a status.
    pub fn is_expired_status(&self, status: ExpiryStatus) -> bool {
        match status {
            ExpiryStatus::Expired { .. } => true,
            ExpiryStatus::NotExpired { .. } => false,
            ExpiryStatus::Unknown => self.policy == UnknownExpiryPolicy::FailClosed,
        }
    }

    pub fn is_expired_at<Tz: TimeZone>(&self, expiry: &str, tz: &Tz, now_millis: i64) -> bool {
        self.is_expired_status(self.status_at(expiry, tz, now_millis))
    }

    pub fn is_expired(&self, expiry: &str) -> bool {
        self.is_expired_status(self.status(expiry))
    }
}

// =============================================================================
// Convenience Functions (English months, local time, fail-open)
// =============================================================================

/// End-of-day local timestamp (epoch ms) of `expiry`, or `None` if it cannot
/// be normalized.
///
/// ## Example
/// ```rust
/// use leaflet_core::expiry::get_expiry_time;
///
/// assert!(get_expiry_time("250600").is_some());
/// assert_eq!(get_expiry_time("notadate"), None);
/// ```
pub fn get_expiry_time(expiry: &str) -> Option<i64> {
    ExpiryChecker::default().expiry_time_in(expiry, &Local)
}

/// True if `expiry` has passed. Unknown dates are never expired.
pub fn is_expired(expiry: &str) -> bool {
    ExpiryChecker::default().is_expired(expiry)
}

/// End-of-month local timestamp (epoch ms) for the month of `date`,
/// whatever day it names.
pub fn convert_to_last_month_day(date: &str) -> Option<i64> {
    ExpiryDate::parse(date)
        .and_then(ExpiryDate::to_end_of_month)
        .and_then(|end| end.timestamp_millis(&Local))
        .ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn local_end_of_day(year: i32, month: u32, day: u32) -> i64 {
        Local
            .from_local_datetime(&ymd(year, month, day).and_hms_milli_opt(23, 59, 59, 999).unwrap())
            .earliest()
            .unwrap()
            .timestamp_millis()
    }

    fn utc_millis(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32, ms: i64) -> i64 {
        Utc.with_ymd_and_hms(year, month, day, h, m, s)
            .unwrap()
            .timestamp_millis()
            + ms
    }

    #[test]
    fn test_unknown_day_resolves_to_month_end() {
        assert_eq!(get_expiry_time("250600"), Some(local_end_of_day(2025, 6, 30)));

        let expiry = ExpiryDate::parse("240200").unwrap();
        assert_eq!(expiry.date(), ymd(2024, 2, 29)); // leap year
        let expiry = ExpiryDate::parse("251200").unwrap();
        assert_eq!(expiry.date(), ymd(2025, 12, 31)); // year rollover
    }

    #[test]
    fn test_known_day() {
        assert_eq!(get_expiry_time("250615"), Some(local_end_of_day(2025, 6, 15)));
        let expiry = ExpiryDate::parse("250615").unwrap();
        assert!(expiry.is_day_known());
    }

    #[test]
    fn test_end_of_day_is_last_millisecond() {
        let expiry = ExpiryDate::parse("250615").unwrap();
        let end = expiry.end_of_day(&Local).unwrap();
        assert_eq!(end.hour(), 23);
        assert_eq!(end.minute(), 59);
        assert_eq!(end.second(), 59);
        assert_eq!(end.timestamp_subsec_millis(), 999);
    }

    #[test]
    fn test_fixed_offset_timestamp() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let checker = ExpiryChecker::default();
        assert_eq!(
            checker.expiry_time_in("250600", &tz),
            Some(utc_millis(2025, 6, 30, 21, 59, 59, 999))
        );
        assert_eq!(
            checker.expiry_time_in("250615", &Utc),
            Some(utc_millis(2025, 6, 15, 23, 59, 59, 999))
        );
    }

    #[test]
    fn test_accepted_layouts() {
        let june_15 = ymd(2025, 6, 15);
        for raw in [
            "250615",
            " 25 06 15 ",
            "2025-06-15",
            "15 - Jun - 2025",
            "15-June-2025",
            "15 / jun / 2025",
            "15  Jun  2025",
            "15 Jun 2025",
        ] {
            assert_eq!(ExpiryDate::parse(raw).unwrap().date(), june_15, "{raw}");
        }

        let june_end = ymd(2025, 6, 30);
        for raw in ["250600", "2025-06-00", "00 - Jun - 2025", "Jun - 2025"] {
            let expiry = ExpiryDate::parse(raw).unwrap();
            assert_eq!(expiry.date(), june_end, "{raw}");
            assert!(!expiry.is_day_known(), "{raw}");
        }
    }

    #[test]
    fn test_custom_month_table() {
        let months = MonthNames::new(
            [
                "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August",
                "September", "Oktober", "November", "Dezember",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        )
        .unwrap();
        let expiry = ExpiryDate::parse_with("15 - Mär - 2025", &months).unwrap();
        assert_eq!(expiry.date(), ymd(2025, 3, 15));
        // English names are not known to this table
        assert!(ExpiryDate::parse_with("15 - Mar - 2025", &months).is_err());
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(ExpiryDate::parse("   "), Err(ExpiryError::Empty));
        assert!(matches!(
            ExpiryDate::parse("notadate"),
            Err(ExpiryError::UnrecognizedFormat(_))
        ));
        assert_eq!(
            ExpiryDate::parse("251315"),
            Err(ExpiryError::MonthOutOfRange(13))
        );
        assert_eq!(
            ExpiryDate::parse("250631"),
            Err(ExpiryError::InvalidDate {
                year: 2025,
                month: 6,
                day: 31
            })
        );
        assert!(matches!(
            ExpiryDate::parse("15 - Foo - 2025"),
            Err(ExpiryError::UnknownMonth(_))
        ));
        assert!(matches!(
            ExpiryDate::parse("2025-0x-15"),
            Err(ExpiryError::NotNumeric { part: "month", .. })
        ));
        assert_eq!(
            ExpiryDate::parse("Jun - 4000000000"),
            Err(ExpiryError::NotNumeric {
                part: "year",
                value: "4000000000".to_string()
            })
        );

        assert_eq!(get_expiry_time("notadate"), None);
        assert_eq!(get_expiry_time(""), None);
    }

    #[test]
    fn test_pre_epoch_has_no_timestamp() {
        let checker = ExpiryChecker::default();
        assert_eq!(checker.expiry_time_in("1969-12-30", &Utc), None);
    }

    #[test]
    fn test_is_expired_fails_open() {
        assert!(!is_expired("notadate"));
        assert!(!is_expired(""));
        assert!(is_expired("000115")); // 2000-01-15
    }

    #[test]
    fn test_status_at() {
        let checker = ExpiryChecker::default();
        let end = utc_millis(2025, 6, 30, 23, 59, 59, 999);

        assert_eq!(
            checker.status_at("250600", &Utc, end - 1),
            ExpiryStatus::NotExpired { expires_at: end }
        );
        // Expired from the end-of-day instant onwards
        assert_eq!(
            checker.status_at("250600", &Utc, end),
            ExpiryStatus::Expired { expires_at: end }
        );
        assert_eq!(
            checker.status_at("bogus", &Utc, end),
            ExpiryStatus::Unknown
        );

        assert_eq!(checker.status_at("250600", &Utc, end).expires_at(), Some(end));
        assert!(checker.status_at("bogus", &Utc, end).is_unknown());
        assert_eq!(checker.status_at("bogus", &Utc, end).expires_at(), None);
        assert!(!checker.status_at("250600", &Utc, 0).is_unknown());
    }

    #[test]
    fn test_fail_closed_policy() {
        let open = ExpiryChecker::default();
        let closed = ExpiryChecker::new(MonthNames::english(), UnknownExpiryPolicy::FailClosed);
        let now = utc_millis(2025, 1, 1, 0, 0, 0, 0);

        assert!(!open.is_expired_at("bogus", &Utc, now));
        assert!(closed.is_expired_at("bogus", &Utc, now));
        // Known dates are unaffected by the policy
        assert!(!closed.is_expired_at("250600", &Utc, now));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "fail_open".parse::<UnknownExpiryPolicy>().unwrap(),
            UnknownExpiryPolicy::FailOpen
        );
        assert_eq!(
            "Fail-Closed".parse::<UnknownExpiryPolicy>().unwrap(),
            UnknownExpiryPolicy::FailClosed
        );
        assert!("strict".parse::<UnknownExpiryPolicy>().is_err());
        assert_eq!(UnknownExpiryPolicy::FailClosed.to_string(), "fail_closed");
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_value(ExpiryStatus::Expired { expires_at: 42 }).unwrap();
        assert_eq!(json["status"], "expired");
        assert_eq!(json["expiresAt"], 42);

        let json = serde_json::to_value(ExpiryStatus::Unknown).unwrap();
        assert_eq!(json["status"], "unknown");
    }

    #[test]
    fn test_format_iso_date() {
        assert_eq!(
            convert_from_iso("2025-06-15", false, Some("/")).unwrap(),
            "15 / Jun / 2025"
        );
        assert_eq!(
            convert_from_iso("2025-06-15", true, Some("/")).unwrap(),
            "15 / June / 2025"
        );
        // Default separator
        assert_eq!(
            convert_from_iso("2025-06-15", false, None).unwrap(),
            "15 - Jun - 2025"
        );
        // Unknown day passes through
        assert_eq!(
            convert_from_iso("2025-06-00", false, None).unwrap(),
            "00 - Jun - 2025"
        );
        // Month without leading zero
        assert_eq!(
            convert_from_iso("2025-6-15", false, None).unwrap(),
            "15 - Jun - 2025"
        );
    }

    #[test]
    fn test_format_iso_date_rejects() {
        assert_eq!(
            convert_from_iso("2025-13-15", false, None),
            Err(ExpiryError::MonthOutOfRange(13))
        );
        assert_eq!(
            convert_from_iso("2025-00-15", false, None),
            Err(ExpiryError::MonthOutOfRange(0))
        );
        assert!(convert_from_iso("250615", false, None).is_err());
        assert!(convert_from_iso("2025-06", false, None).is_err());
        assert!(convert_from_iso("2025-Jun-15", false, None).is_err());
    }

    #[test]
    fn test_get_date_for_display() {
        assert_eq!(get_date_for_display("00 - Jun - 2025"), "Jun - 2025");
        assert_eq!(get_date_for_display("00/Jun/2025"), "Jun/2025");
        assert_eq!(get_date_for_display("15 - Jun - 2025"), "15 - Jun - 2025");
    }

    #[test]
    fn test_display() {
        let months = MonthNames::english();
        let format = DateFormat::default();
        assert_eq!(
            ExpiryDate::parse("250615").unwrap().display(&format, &months),
            "15 - Jun - 2025"
        );
        assert_eq!(
            ExpiryDate::parse("250600").unwrap().display(&format, &months),
            "Jun - 2025"
        );
        let full = DateFormat::new(true, Some("/"));
        assert_eq!(
            ExpiryDate::parse("250601").unwrap().display(&full, &months),
            "01 / June / 2025"
        );
    }

    #[test]
    fn test_convert_to_last_month_day() {
        assert_eq!(
            convert_to_last_month_day("00 - Feb - 2025"),
            Some(local_end_of_day(2025, 2, 28))
        );
        assert_eq!(
            convert_to_last_month_day("2025-04-10"),
            Some(local_end_of_day(2025, 4, 30))
        );
        assert_eq!(convert_to_last_month_day("garbage"), None);
    }
}
