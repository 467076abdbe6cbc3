use std::sync::Arc;

use clipocr_types::OcrLanguage;
use image::RgbaImage;

use crate::preprocess::to_grayscale_png;
use crate::tesseract::{OcrError, TesseractEngine};

/// Text recognition backend
#[async_trait::async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Recognize the text in a captured image
    async fn recognize(&self, image: Arc<RgbaImage>, language: OcrLanguage) -> Result<String, OcrError>;

    /// Short name for logs
    fn name(&self) -> &str;
}

#[async_trait::async_trait]
impl TextRecognizer for TesseractEngine {
    async fn recognize(&self, image: Arc<RgbaImage>, language: OcrLanguage) -> Result<String, OcrError> {
        let engine = self.clone();
        tokio::task::spawn_blocking(move || {
            let png = to_grayscale_png(&image)?;
            engine.recognize_png(&png, language)
        })
        .await
        .map_err(|e| OcrError::Worker(e.to_string()))?
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}
