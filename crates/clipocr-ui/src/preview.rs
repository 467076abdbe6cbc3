use clipocr_core::preview::fit_within;
use clipocr_types::Frame;
use image::RgbaImage;
use image::imageops::{self, FilterType};
use slint::{Image, Rgba8Pixel, SharedPixelBuffer};

pub fn frame_to_image(frame: &Frame) -> Image {
    let buffer =
        SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(&frame.pixels[..], frame.width, frame.height);
    Image::from_rgba8(buffer)
}

/// Downscaled copy of a capture for an area given in physical pixels.
///
/// Returns the image and its logical size, or `None` before the area is laid out.
pub fn scaled_preview(frame: &Frame, area: (u32, u32), scale_factor: f32) -> Option<(Image, f32, f32)> {
    let (width, height) = fit_within((frame.width, frame.height), area)?;

    if (width, height) == (frame.width, frame.height) {
        return Some((
            frame_to_image(frame),
            width as f32 / scale_factor,
            height as f32 / scale_factor,
        ));
    }

    let source = RgbaImage::from_raw(frame.width, frame.height, frame.pixels.to_vec())?;
    let resized = imageops::resize(&source, width, height, FilterType::Lanczos3);
    let buffer = SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(resized.as_raw().as_slice(), width, height);
    Some((
        Image::from_rgba8(buffer),
        width as f32 / scale_factor,
        height as f32 / scale_factor,
    ))
}
