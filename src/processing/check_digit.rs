// ICAO Doc 9303 check digit: weighted sum modulo 10 over the MRZ alphabet.

const WEIGHTS: [u32; 3] = [7, 3, 1];

/// Numeric value of an MRZ character. Digits keep their face value, `A`-`Z`
/// map to 10-35, and the `<` filler maps to 0. Anything outside the MRZ
/// alphabet is treated as a filler.
pub fn char_value(c: char) -> u32 {
    match c {
        '0'..='9' => c as u32 - '0' as u32,
        'A'..='Z' => c as u32 - 'A' as u32 + 10,
        _ => 0,
    }
}

pub fn compute_check_digit(input: &str) -> u8 {
    let sum: u32 = input
        .chars()
        .zip(WEIGHTS.iter().cycle())
        .map(|(c, weight)| char_value(c) * weight)
        .sum();

    (sum % 10) as u8
}
