//! # Month Names
//!
//! An injected month-name table used to render and read display dates.
//!
//! The table is a plain value handed to the expiry helpers and the field
//! mapper, so alternate locales can be configured (or tested) without any
//! global state. Months are indexed 1-12.
//!
//! ```rust
//! use leaflet_core::locale::{MonthNames, MonthStyle};
//!
//! let months = MonthNames::english();
//! assert_eq!(months.name(6, MonthStyle::Abbreviated), Some("Jun"));
//! assert_eq!(months.name(6, MonthStyle::Full), Some("June"));
//! assert_eq!(months.lookup("june"), Some(6));
//! ```

use crate::error::LocaleError;

const ENGLISH: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Which form of a month name to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthStyle {
    /// Three-letter form, e.g. "Jun".
    #[default]
    Abbreviated,
    /// Full form, e.g. "June".
    Full,
}

impl MonthStyle {
    pub fn from_full_flag(full: bool) -> Self {
        if full {
            MonthStyle::Full
        } else {
            MonthStyle::Abbreviated
        }
    }
}

/// Twelve full month names plus their abbreviations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthNames {
    full: Vec<String>,
    abbreviated: Vec<String>,
}

impl Default for MonthNames {
    fn default() -> Self {
        MonthNames::english()
    }
}

impl MonthNames {
    /// English month names; abbreviations are the first three letters.
    pub fn english() -> Self {
        let full: Vec<String> = ENGLISH.iter().map(|name| name.to_string()).collect();
        let abbreviated = full.iter().map(|name| abbreviate(name)).collect();
        MonthNames { full, abbreviated }
    }

    /// Builds a table from 12 full names, abbreviating each to its first
    /// three characters.
    pub fn new(full: Vec<String>) -> Result<Self, LocaleError> {
        check_names("full", &full)?;
        let abbreviated = full.iter().map(|name| abbreviate(name)).collect();
        Ok(MonthNames { full, abbreviated })
    }

    /// Builds a table with explicit abbreviations, for locales where the
    /// first three characters are ambiguous or wrong.
    pub fn with_abbreviations(
        full: Vec<String>,
        abbreviated: Vec<String>,
    ) -> Result<Self, LocaleError> {
        check_names("full", &full)?;
        check_names("abbreviated", &abbreviated)?;
        Ok(MonthNames { full, abbreviated })
    }

    /// The name of `month` (1-12) in the given style.
    pub fn name(&self, month: u32, style: MonthStyle) -> Option<&str> {
        let index = usize::try_from(month).ok()?.checked_sub(1)?;
        let names = match style {
            MonthStyle::Abbreviated => &self.abbreviated,
            MonthStyle::Full => &self.full,
        };
        names.get(index).map(String::as_str)
    }

    /// Finds the month number (1-12) for a full or abbreviated name.
    ///
    /// Case-insensitive; full names win over abbreviations.
    pub fn lookup(&self, name: &str) -> Option<u32> {
        let name = name.trim().to_lowercase();
        self.full
            .iter()
            .position(|n| n.to_lowercase() == name)
            .or_else(|| {
                self.abbreviated
                    .iter()
                    .position(|n| n.to_lowercase() == name)
            })
            .map(|index| index as u32 + 1)
    }
}

fn abbreviate(name: &str) -> String {
    name.chars().take(3).collect()
}

fn check_names(kind: &'static str, names: &[String]) -> Result<(), LocaleError> {
    if names.len() != 12 {
        return Err(LocaleError::WrongCount {
            kind,
            actual: names.len(),
        });
    }
    if let Some(index) = names.iter().position(|n| n.trim().is_empty()) {
        return Err(LocaleError::EmptyName {
            kind,
            month: index + 1,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn french() -> Vec<String> {
        [
            "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août",
            "septembre", "octobre", "novembre", "décembre",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn test_english_names() {
        let months = MonthNames::english();
        assert_eq!(months.name(1, MonthStyle::Full), Some("January"));
        assert_eq!(months.name(9, MonthStyle::Abbreviated), Some("Sep"));
        assert_eq!(months.name(0, MonthStyle::Full), None);
        assert_eq!(months.name(13, MonthStyle::Full), None);
    }

    #[test]
    fn test_lookup() {
        let months = MonthNames::english();
        assert_eq!(months.lookup("Jun"), Some(6));
        assert_eq!(months.lookup("DECEMBER"), Some(12));
        assert_eq!(months.lookup("Juni"), None);
    }

    #[test]
    fn test_custom_locale_abbreviates_by_chars() {
        let months = MonthNames::new(french()).unwrap();
        // Multi-byte characters are not split
        assert_eq!(months.name(2, MonthStyle::Abbreviated), Some("fév"));
        assert_eq!(months.name(8, MonthStyle::Abbreviated), Some("aoû"));
        assert_eq!(months.lookup("Juillet"), Some(7));
    }

    #[test]
    fn test_explicit_abbreviations() {
        let mut abbreviated: Vec<String> = french().iter().map(|n| abbreviate(n)).collect();
        abbreviated[5] = "juin".to_string();
        abbreviated[6] = "juil".to_string();
        let months = MonthNames::with_abbreviations(french(), abbreviated).unwrap();
        assert_eq!(months.name(7, MonthStyle::Abbreviated), Some("juil"));
    }

    #[test]
    fn test_rejects_malformed_tables() {
        let err = MonthNames::new(vec!["January".to_string()]).unwrap_err();
        assert_eq!(
            err,
            LocaleError::WrongCount {
                kind: "full",
                actual: 1
            }
        );

        let mut names = french();
        names[3] = "  ".to_string();
        let err = MonthNames::new(names).unwrap_err();
        assert_eq!(
            err,
            LocaleError::EmptyName {
                kind: "full",
                month: 4
            }
        );
    }
}
