use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};

/// Convert to 8-bit luma and encode as PNG, the input Tesseract reads from stdin.
///
/// Grayscale input gives Tesseract's binarizer a cleaner start on colored UI
/// text than RGBA with alpha.
pub fn to_grayscale_png(image: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let gray = DynamicImage::ImageRgba8(image.clone()).into_luma8();
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(gray).write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}
