mod capture;
mod preprocess;
mod recognizer;
mod tesseract;

pub use capture::{
    MonitorInfo, capture_primary_frame, capture_screen_region, crop, list_monitors,
};
pub use preprocess::to_grayscale_png;
pub use recognizer::TextRecognizer;
pub use tesseract::{
    OcrError, TesseractEngine, parse_language_list, parse_version, recognition_args,
    validate_path,
};
