pub mod check_digit;
pub mod mrz_parser;
pub mod ocr;

pub use check_digit::compute_check_digit;
pub use mrz_parser::{select_mrz_line, MrzParser};
pub use ocr::{OcrProvider, TextOcrProvider};

#[cfg(feature = "tesseract")]
pub use ocr::TesseractOcrProvider;
