use thiserror::Error;

/// Structural problems with an MRZ line. The validator cannot reason about a
/// line that fails these checks, so they abort the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MrzFormatError {
    #[error("MRZ line must be {expected} characters, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("check digit at position {position} is not a decimal digit: {found:?}")]
    InvalidCheckDigitChar { position: usize, found: char },
}

#[derive(Debug, Error)]
pub enum PassportError {
    #[error("MRZ format error: {0}")]
    MrzFormat(#[from] MrzFormatError),
    #[error("MRZ extraction error: {0}")]
    MrzExtractionError(String),
    #[error("OCR error: {0}")]
    OcrError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl From<std::io::Error> for PassportError {
    fn from(err: std::io::Error) -> Self {
        PassportError::IoError(err.to_string())
    }
}
