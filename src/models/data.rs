use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::utils::MrzFormatError;

/// Characters per MRZ line for TD3 (passport, 125.0mm × 88.0mm) documents.
pub const TD3_LINE_LENGTH: usize = 44;

/// Two-digit years at or above this value belong to the 1900s.
pub const PIVOT_YEAR: u32 = 50;

/// Second line of a TD3 machine readable zone, exactly 44 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MrzLine(String);

impl MrzLine {
    pub fn new(raw: impl Into<String>) -> Result<Self, MrzFormatError> {
        let raw = raw.into();
        let actual = raw.chars().count();
        if actual != TD3_LINE_LENGTH {
            return Err(MrzFormatError::WrongLength {
                expected: TD3_LINE_LENGTH,
                actual,
            });
        }
        Ok(MrzLine(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Characters in `[start, end)`, counted in characters rather than bytes.
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.0.chars().skip(start).take(end - start).collect()
    }

    pub fn char_at(&self, position: usize) -> Option<char> {
        self.0.chars().nth(position)
    }
}

impl fmt::Display for MrzLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Typed view over the fields of a TD3 second line that carry check digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MrzFields {
    pub passport_number: String,
    pub passport_number_check: u8,
    pub date_of_birth: String,
    pub date_of_birth_check: u8,
    pub date_of_expiry: String,
    pub date_of_expiry_check: u8,
    pub personal_number: String,
    pub personal_number_check: u8,
    pub composite_check: u8,
}

impl MrzFields {
    /// Input of the composite check digit: each checked field followed by its
    /// own check digit, in line order.
    pub fn composite_input(&self) -> String {
        format!(
            "{}{}{}{}{}{}{}{}",
            self.passport_number,
            self.passport_number_check,
            self.date_of_birth,
            self.date_of_birth_check,
            self.date_of_expiry,
            self.date_of_expiry_check,
            self.personal_number,
            self.personal_number_check,
        )
    }
}

/// A resolved calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(CalendarDate)
    }

    /// Resolve an MRZ `YYMMDD` field. Two-digit years from 50 map to the
    /// 1900s, the rest to the 2000s. Returns `None` when the field is not six
    /// digits or names a day that does not exist.
    pub fn from_yymmdd(field: &str) -> Option<Self> {
        if field.len() != 6 || !field.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let year = field[0..2].parse::<u32>().ok()?;
        let month = field[2..4].parse::<u32>().ok()?;
        let day = field[4..6].parse::<u32>().ok()?;

        let full_year = if year >= PIVOT_YEAR {
            1900 + year
        } else {
            2000 + year
        };

        Self::new(full_year as i32, month, day)
    }

    /// Parse an ISO `YYYY-MM-DD` date.
    pub fn parse_iso(text: &str) -> Option<Self> {
        NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .ok()
            .map(CalendarDate)
    }

    pub fn today() -> Self {
        CalendarDate(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// `DD MON YYYY` with an uppercase English month, e.g. `05 JUL 2030`.
    pub fn format_display(&self) -> String {
        self.0.format("%d %b %Y").to_string().to_uppercase()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub issue_type: ValidationIssueType,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationIssueType {
    Mrz,
    Expiry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryValidationResult {
    pub is_valid: bool,
    pub not_expired: bool,
    pub expiry_date: Option<CalendarDate>,
    pub issues: Vec<ValidationIssue>,
}

/// Outcome of validating one MRZ line. A well-formed line that fails its
/// checks still produces a verdict, with `is_valid` false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationVerdict {
    pub is_valid: bool,
    pub passport_number_check_valid: bool,
    pub date_of_birth_check_valid: bool,
    pub date_of_expiry_check_valid: bool,
    pub personal_number_check_valid: bool,
    pub composite_check_valid: bool,
    pub not_expired: bool,
    pub passport_number: String,
    /// First 10 characters of the 14 character personal number field.
    pub personal_number: String,
    pub date_of_birth: String,
    pub date_of_expiry: String,
    pub fields: MrzFields,
    pub issues: Vec<ValidationIssue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pivot_year_boundary() {
        assert_eq!(
            CalendarDate::from_yymmdd("500101"),
            CalendarDate::new(1950, 1, 1)
        );
        assert_eq!(
            CalendarDate::from_yymmdd("490101"),
            CalendarDate::new(2049, 1, 1)
        );

        let date = CalendarDate::from_yymmdd("300705").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2030, 7, 5));
    }

    #[test]
    fn test_yymmdd_rejects_impossible_days() {
        assert_eq!(CalendarDate::from_yymmdd("301301"), None);
        assert_eq!(CalendarDate::from_yymmdd("230229"), None);
        assert_eq!(CalendarDate::from_yymmdd("3007<5"), None);
        assert_eq!(CalendarDate::from_yymmdd("30070"), None);
        assert!(CalendarDate::from_yymmdd("240229").is_some());
    }

    #[test]
    fn test_format_display() {
        let date = CalendarDate::new(2030, 7, 5).unwrap();
        assert_eq!(date.format_display(), "05 JUL 2030");
        assert_eq!(date.to_string(), "2030-07-05");
    }

    #[test]
    fn test_parse_iso() {
        assert_eq!(
            CalendarDate::parse_iso("2026-10-19"),
            CalendarDate::new(2026, 10, 19)
        );
        assert_eq!(CalendarDate::parse_iso("19/10/2026"), None);
    }

    #[test]
    fn test_mrz_line_length_is_counted_in_characters() {
        let line = "É".repeat(TD3_LINE_LENGTH);
        assert!(MrzLine::new(line).is_ok());

        let err = MrzLine::new("<".repeat(43)).unwrap_err();
        assert_eq!(
            err,
            MrzFormatError::WrongLength {
                expected: 44,
                actual: 43
            }
        );
    }

    #[test]
    fn test_composite_input_order() {
        let fields = MrzFields {
            passport_number: "L898902C3".to_string(),
            passport_number_check: 6,
            date_of_birth: "740812".to_string(),
            date_of_birth_check: 2,
            date_of_expiry: "120415".to_string(),
            date_of_expiry_check: 9,
            personal_number: "ZE184226B<<<<<".to_string(),
            personal_number_check: 1,
            composite_check: 0,
        };
        assert_eq!(
            fields.composite_input(),
            "L898902C3674081221204159ZE184226B<<<<<1"
        );
    }
}
