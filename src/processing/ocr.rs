use crate::utils::PassportError;

/// Characters Tesseract is allowed to emit when reading an MRZ.
pub const MRZ_CHAR_WHITELIST: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789<";

/// Turns a document image into recognized text, one line per text line.
pub trait OcrProvider {
    fn recognize(&self, image_data: &[u8]) -> Result<String, PassportError>;
}

/// Provider for text that was already recognized elsewhere; ignores the image.
#[derive(Debug, Clone)]
pub struct TextOcrProvider {
    text: String,
}

impl TextOcrProvider {
    pub fn new(text: impl Into<String>) -> Self {
        TextOcrProvider { text: text.into() }
    }
}

impl OcrProvider for TextOcrProvider {
    fn recognize(&self, _image_data: &[u8]) -> Result<String, PassportError> {
        Ok(self.text.clone())
    }
}

#[cfg(feature = "tesseract")]
pub use self::tesseract_provider::TesseractOcrProvider;

#[cfg(feature = "tesseract")]
mod tesseract_provider {
    use std::io::Write;

    use log::debug;
    use tempfile::NamedTempFile;
    use tesseract::Tesseract;

    use super::{OcrProvider, MRZ_CHAR_WHITELIST};
    use crate::utils::PassportError;

    pub struct TesseractOcrProvider {
        datapath: Option<String>,
        language: String,
    }

    impl TesseractOcrProvider {
        pub fn new(datapath: Option<String>, language: impl Into<String>) -> Self {
            TesseractOcrProvider {
                datapath,
                language: language.into(),
            }
        }
    }

    impl OcrProvider for TesseractOcrProvider {
        fn recognize(&self, image_data: &[u8]) -> Result<String, PassportError> {
            let mut temp_file = NamedTempFile::new()
                .map_err(|e| PassportError::OcrError(format!("Failed to create temp file: {}", e)))?;

            temp_file
                .write_all(image_data)
                .map_err(|e| PassportError::OcrError(format!("Failed to write to temp file: {}", e)))?;

            let image_path_str = temp_file.path().to_str().ok_or_else(|| {
                PassportError::OcrError("Failed to convert path to string".to_string())
            })?;

            let text = Tesseract::new(self.datapath.as_deref(), Some(self.language.as_str()))
                .map_err(|e| PassportError::OcrError(format!("Tesseract init error: {}", e)))?
                .set_image(image_path_str)
                .map_err(|e| PassportError::OcrError(format!("Tesseract set image error: {}", e)))?
                .set_variable("tessedit_char_whitelist", MRZ_CHAR_WHITELIST)
                .map_err(|e| PassportError::OcrError(format!("Tesseract set variable error: {}", e)))?
                .get_text()
                .map_err(|e| PassportError::OcrError(format!("Tesseract error: {}", e)))?;

            debug!("MRZ OCR result:\n{}", text);
            Ok(text)
        }
    }
}
