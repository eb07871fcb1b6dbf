use log::info;

use crate::models::{CalendarDate, ValidationVerdict};
use crate::processing::{select_mrz_line, OcrProvider};
use crate::utils::PassportError;
use crate::validation::MrzValidator;

/// Runs a document image through OCR and validates the MRZ line it finds.
pub struct PassportValidator<P: OcrProvider> {
    provider: P,
}

impl<P: OcrProvider> PassportValidator<P> {
    pub fn new(provider: P) -> Self {
        PassportValidator { provider }
    }

    /// Validate against today's local date.
    pub fn validate(&self, image_data: &[u8]) -> Result<ValidationVerdict, PassportError> {
        self.validate_on(image_data, CalendarDate::today())
    }

    pub fn validate_on(
        &self,
        image_data: &[u8],
        now: CalendarDate,
    ) -> Result<ValidationVerdict, PassportError> {
        // Step 1: Recognize text
        let text = self.provider.recognize(image_data)?;

        // Step 2: The MRZ line is the last line of recognized text
        let line = select_mrz_line(&text).ok_or_else(|| {
            PassportError::MrzExtractionError("No text line found in OCR output".to_string())
        })?;
        info!("MRZ line: {}", line);

        // Step 3: Validate check digits and expiry
        Ok(MrzValidator::validate(line, now)?)
    }
}
