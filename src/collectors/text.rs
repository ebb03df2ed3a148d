use image::DynamicImage;

use crate::ocr::TextExtractor;
use crate::types::Collected;

/// Lowest score for readable-text volume.
pub const TEXT_FLOOR: f64 = 30.0;
/// Score used when no text could be extracted at all.
pub const OCR_FALLBACK: f64 = 50.0;

/// `min(100, chars / 50)`, floored at 30.
pub fn text_length_score(text: &str) -> f64 {
    let chars = text.chars().count() as f64;
    (chars / 50.0).min(100.0).max(TEXT_FLOOR)
}

/// Typography heuristic: run OCR and score the amount of text found.
pub fn text_score(extractor: &dyn TextExtractor, img: &DynamicImage) -> Collected<f64> {
    match extractor.extract_text(img) {
        Ok(text) => Collected::Measured(text_length_score(&text)),
        Err(err) => Collected::fallback(OCR_FALLBACK, err.to_string()),
    }
}
