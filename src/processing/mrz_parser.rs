use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;

use crate::models::{MrzFields, MrzLine};
use crate::utils::MrzFormatError;

lazy_static! {
    static ref MRZ_ALPHABET: Regex = Regex::new(r"^[A-Z0-9<]*$").unwrap();
}

// TD3 second line layout, 0-indexed and end-exclusive:
// 0-9 passport number, 9 check digit, 10-13 nationality,
// 13-19 birth date, 19 check digit, 20 sex, 21-27 expiry date,
// 27 check digit, 28-42 personal number, 42 check digit,
// 43 composite check digit
const PASSPORT_NUMBER: (usize, usize) = (0, 9);
const PASSPORT_NUMBER_CHECK: usize = 9;
const DATE_OF_BIRTH: (usize, usize) = (13, 19);
const DATE_OF_BIRTH_CHECK: usize = 19;
const DATE_OF_EXPIRY: (usize, usize) = (21, 27);
const DATE_OF_EXPIRY_CHECK: usize = 27;
const PERSONAL_NUMBER: (usize, usize) = (28, 42);
const PERSONAL_NUMBER_CHECK: usize = 42;
const COMPOSITE_CHECK: usize = 43;

pub struct MrzParser;

impl MrzParser {
    /// Slice a raw TD3 second line into its checked fields. Characters are
    /// taken verbatim; nothing is trimmed or case folded.
    pub fn extract_fields(raw: &str) -> Result<MrzFields, MrzFormatError> {
        let line = MrzLine::new(raw)?;

        if !MRZ_ALPHABET.is_match(line.as_str()) {
            warn!(
                "MRZ line contains characters outside A-Z, 0-9 and '<'; they count as fillers: {}",
                line
            );
        }

        let fields = MrzFields {
            passport_number: line.slice(PASSPORT_NUMBER.0, PASSPORT_NUMBER.1),
            passport_number_check: Self::check_digit_at(&line, PASSPORT_NUMBER_CHECK)?,
            date_of_birth: line.slice(DATE_OF_BIRTH.0, DATE_OF_BIRTH.1),
            date_of_birth_check: Self::check_digit_at(&line, DATE_OF_BIRTH_CHECK)?,
            date_of_expiry: line.slice(DATE_OF_EXPIRY.0, DATE_OF_EXPIRY.1),
            date_of_expiry_check: Self::check_digit_at(&line, DATE_OF_EXPIRY_CHECK)?,
            personal_number: line.slice(PERSONAL_NUMBER.0, PERSONAL_NUMBER.1),
            personal_number_check: Self::check_digit_at(&line, PERSONAL_NUMBER_CHECK)?,
            composite_check: Self::check_digit_at(&line, COMPOSITE_CHECK)?,
        };

        debug!("Extracted MRZ fields: {:?}", fields);
        Ok(fields)
    }

    fn check_digit_at(line: &MrzLine, position: usize) -> Result<u8, MrzFormatError> {
        let found = line.char_at(position).unwrap_or(' ');
        found
            .to_digit(10)
            .map(|digit| digit as u8)
            .ok_or(MrzFormatError::InvalidCheckDigitChar { position, found })
    }
}

/// The MRZ line is the last non-empty line of recognized text.
pub fn select_mrz_line(text: &str) -> Option<&str> {
    text.lines()
        .rev()
        .map(|line| line.trim_end())
        .find(|line| !line.is_empty())
}
