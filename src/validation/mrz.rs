use log::{debug, info};

use crate::models::{CalendarDate, ValidationIssue, ValidationIssueType, ValidationVerdict};
use crate::processing::{compute_check_digit, MrzParser};
use crate::utils::MrzFormatError;
use crate::validation::ExpiryValidator;

/// Characters of the personal number surfaced for display.
pub const PERSONAL_NUMBER_DISPLAY_LEN: usize = 10;

pub struct MrzValidator;

impl MrzValidator {
    /// Validate the second line of a TD3 MRZ against `now`.
    ///
    /// Structural problems (wrong length, non-digit check digit) are returned
    /// as errors. Check digit mismatches and expired documents are not
    /// errors; they produce a verdict with `is_valid` set to false.
    pub fn validate(line: &str, now: CalendarDate) -> Result<ValidationVerdict, MrzFormatError> {
        let fields = MrzParser::extract_fields(line)?;
        let mut issues = Vec::new();

        let passport_number_check_valid = Self::check_field(
            "Passport number",
            &fields.passport_number,
            fields.passport_number_check,
            &mut issues,
        );
        let date_of_birth_check_valid = Self::check_field(
            "Date of birth",
            &fields.date_of_birth,
            fields.date_of_birth_check,
            &mut issues,
        );
        let date_of_expiry_check_valid = Self::check_field(
            "Date of expiry",
            &fields.date_of_expiry,
            fields.date_of_expiry_check,
            &mut issues,
        );
        let personal_number_check_valid = Self::check_field(
            "Personal number",
            &fields.personal_number,
            fields.personal_number_check,
            &mut issues,
        );
        let composite_check_valid = Self::check_field(
            "Composite",
            &fields.composite_input(),
            fields.composite_check,
            &mut issues,
        );

        let expiry = ExpiryValidator::validate(&fields.date_of_expiry, now);
        issues.extend(expiry.issues);

        let is_valid = passport_number_check_valid
            && date_of_birth_check_valid
            && date_of_expiry_check_valid
            && personal_number_check_valid
            && composite_check_valid
            && expiry.not_expired;

        info!(
            "MRZ line for passport {} is {}",
            fields.passport_number,
            if is_valid { "VALID" } else { "INVALID" }
        );

        let date_of_expiry = expiry
            .expiry_date
            .map(|date| date.format_display())
            .unwrap_or_else(|| fields.date_of_expiry.clone());
        let date_of_birth = CalendarDate::from_yymmdd(&fields.date_of_birth)
            .map(|date| date.format_display())
            .unwrap_or_else(|| fields.date_of_birth.clone());

        Ok(ValidationVerdict {
            is_valid,
            passport_number_check_valid,
            date_of_birth_check_valid,
            date_of_expiry_check_valid,
            personal_number_check_valid,
            composite_check_valid,
            not_expired: expiry.not_expired,
            passport_number: fields.passport_number.clone(),
            personal_number: fields
                .personal_number
                .chars()
                .take(PERSONAL_NUMBER_DISPLAY_LEN)
                .collect(),
            date_of_birth,
            date_of_expiry,
            fields,
            issues,
        })
    }

    fn check_field(
        name: &str,
        value: &str,
        expected: u8,
        issues: &mut Vec<ValidationIssue>,
    ) -> bool {
        let computed = compute_check_digit(value);
        let valid = computed == expected;
        debug!("{}: {} validity: {}", name, value, valid);

        if !valid {
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::Mrz,
                message: format!(
                    "{} check digit mismatch: expected {}, computed {}",
                    name, expected, computed
                ),
            });
        }
        valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ICAO 9303 specimen, expiring 2012-04-15
    const ICAO_SAMPLE: &str = "L898902C36UTO7408122F1204159ZE184226B<<<<<10";
    // Same holder, expiry moved to 2030-07-05 with every check digit recomputed
    const VALID_2030: &str = "L898902C36UTO7408122F3007055ZE184226B<<<<<10";
    const EMPTY_PERSONAL_NUMBER: &str = "C01X00T478D<<6408125F3007055<<<<<<<<<<<<<<00";

    fn date(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    fn replace_char(line: &str, position: usize, c: char) -> String {
        line.chars()
            .enumerate()
            .map(|(i, original)| if i == position { c } else { original })
            .collect()
    }

    #[test]
    fn test_valid_line() {
        let verdict = MrzValidator::validate(VALID_2030, date(2026, 10, 19)).unwrap();

        assert!(verdict.is_valid);
        assert!(verdict.passport_number_check_valid);
        assert!(verdict.date_of_birth_check_valid);
        assert!(verdict.date_of_expiry_check_valid);
        assert!(verdict.personal_number_check_valid);
        assert!(verdict.composite_check_valid);
        assert!(verdict.not_expired);
        assert!(verdict.issues.is_empty());

        assert_eq!(verdict.passport_number, "L898902C3");
        assert_eq!(verdict.personal_number, "ZE184226B<");
        assert_eq!(verdict.date_of_expiry, "05 JUL 2030");
        assert_eq!(verdict.date_of_birth, "12 AUG 1974");
    }

    #[test]
    fn test_empty_personal_number() {
        let verdict = MrzValidator::validate(EMPTY_PERSONAL_NUMBER, date(2026, 10, 19)).unwrap();
        assert!(verdict.is_valid);
        assert_eq!(verdict.personal_number, "<<<<<<<<<<");
        assert_eq!(verdict.date_of_birth, "12 AUG 1964");
    }

    #[test]
    fn test_icao_specimen_on_and_after_expiry() {
        let on_expiry = MrzValidator::validate(ICAO_SAMPLE, date(2012, 4, 15)).unwrap();
        assert!(on_expiry.is_valid);
        assert!(on_expiry.not_expired);
        assert_eq!(on_expiry.date_of_expiry, "15 APR 2012");

        let day_after = MrzValidator::validate(ICAO_SAMPLE, date(2012, 4, 16)).unwrap();
        assert!(!day_after.is_valid);
        assert!(!day_after.not_expired);
        assert!(day_after.passport_number_check_valid);
        assert!(day_after.composite_check_valid);
        assert_eq!(day_after.issues.len(), 1);
        assert_eq!(day_after.issues[0].issue_type, ValidationIssueType::Expiry);
    }

    #[test]
    fn test_mutated_passport_number() {
        let mutated = replace_char(VALID_2030, 0, 'M');
        let verdict = MrzValidator::validate(&mutated, date(2026, 10, 19)).unwrap();

        assert!(!verdict.is_valid);
        assert!(!verdict.passport_number_check_valid);
        assert!(verdict.date_of_birth_check_valid);
        assert!(verdict.date_of_expiry_check_valid);
        assert!(verdict.personal_number_check_valid);
        assert!(!verdict.composite_check_valid);
        assert!(verdict.not_expired);
        assert_eq!(verdict.passport_number, "M898902C3");
        assert_eq!(
            verdict.issues[0].message,
            "Passport number check digit mismatch: expected 6, computed 3"
        );
    }

    #[test]
    fn test_mutated_composite_only() {
        let mutated = replace_char(VALID_2030, 43, '7');
        let verdict = MrzValidator::validate(&mutated, date(2026, 10, 19)).unwrap();

        assert!(!verdict.is_valid);
        assert!(verdict.passport_number_check_valid);
        assert!(verdict.date_of_birth_check_valid);
        assert!(verdict.date_of_expiry_check_valid);
        assert!(verdict.personal_number_check_valid);
        assert!(!verdict.composite_check_valid);
    }

    #[test]
    fn test_nationality_and_sex_are_not_checked() {
        let mutated = replace_char(replace_char(VALID_2030, 10, 'D').as_str(), 20, 'M');
        let verdict = MrzValidator::validate(&mutated, date(2026, 10, 19)).unwrap();
        assert!(verdict.is_valid);
    }

    #[test]
    fn test_structural_errors_propagate() {
        assert_eq!(
            MrzValidator::validate(&VALID_2030[..43], date(2026, 10, 19)),
            Err(MrzFormatError::WrongLength {
                expected: 44,
                actual: 43
            })
        );

        let bad_digit = replace_char(VALID_2030, 9, 'O');
        assert_eq!(
            MrzValidator::validate(&bad_digit, date(2026, 10, 19)),
            Err(MrzFormatError::InvalidCheckDigitChar {
                position: 9,
                found: 'O'
            })
        );
    }

    #[test]
    fn test_unresolvable_expiry_is_shown_verbatim() {
        // Month 13, with check digits recomputed so only the expiry fails
        let mut line = String::from("L898902C36UTO7408122F301305");
        line.push(char::from(b'0' + compute_check_digit("301305")));
        line.push_str("ZE184226B<<<<<1");
        let composite = compute_check_digit(&format!(
            "{}{}{}",
            &line[0..10],
            &line[13..20],
            &line[21..43]
        ));
        line.push(char::from(b'0' + composite));

        let verdict = MrzValidator::validate(&line, date(2000, 1, 1)).unwrap();
        assert!(verdict.date_of_expiry_check_valid);
        assert!(verdict.composite_check_valid);
        assert!(!verdict.not_expired);
        assert!(!verdict.is_valid);
        assert_eq!(verdict.date_of_expiry, "301305");
    }
}
