use log::warn;

use crate::models::{CalendarDate, ExpiryValidationResult, ValidationIssue, ValidationIssueType};

pub struct ExpiryValidator;

impl ExpiryValidator {
    /// Check an MRZ `YYMMDD` expiry field against `now`. A document expiring
    /// on `now` is still valid. A field that does not name a real day counts
    /// as expired.
    pub fn validate(date_of_expiry: &str, now: CalendarDate) -> ExpiryValidationResult {
        let mut issues = Vec::new();
        let mut not_expired = false;

        let expiry_date = CalendarDate::from_yymmdd(date_of_expiry);
        if let Some(date) = expiry_date {
            not_expired = date >= now;

            if !not_expired {
                issues.push(ValidationIssue {
                    issue_type: ValidationIssueType::Expiry,
                    message: format!("Passport expired on {}", date),
                });
            }
        } else {
            warn!("Expiry date {:?} is not a calendar date", date_of_expiry);
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::Expiry,
                message: format!("Invalid expiry date: {}", date_of_expiry),
            });
        }

        ExpiryValidationResult {
            is_valid: not_expired,
            not_expired,
            expiry_date,
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn test_expires_today_is_valid() {
        let result = ExpiryValidator::validate("300705", date(2030, 7, 5));
        assert!(result.is_valid);
        assert!(result.not_expired);
        assert!(result.issues.is_empty());
        assert_eq!(result.expiry_date, Some(date(2030, 7, 5)));
    }

    #[test]
    fn test_expired_yesterday() {
        let result = ExpiryValidator::validate("300705", date(2030, 7, 6));
        assert!(!result.not_expired);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].issue_type, ValidationIssueType::Expiry);
        assert_eq!(result.issues[0].message, "Passport expired on 2030-07-05");
    }

    #[test]
    fn test_pivot_applies_to_expiry() {
        // 50 resolves to 1950, long before any realistic "now"
        assert!(!ExpiryValidator::validate("500101", date(2026, 10, 19)).not_expired);
        assert!(ExpiryValidator::validate("490101", date(2026, 10, 19)).not_expired);
    }

    #[test]
    fn test_unresolvable_expiry_counts_as_expired() {
        let result = ExpiryValidator::validate("301341", date(2000, 1, 1));
        assert!(!result.is_valid);
        assert_eq!(result.expiry_date, None);
        assert_eq!(result.issues[0].message, "Invalid expiry date: 301341");
    }
}
