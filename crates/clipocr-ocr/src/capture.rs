use anyhow::{Context, Result};
use clipocr_types::CaptureRegion;
use image::RgbaImage;
use xcap::Monitor;

#[derive(Debug, Clone)]
pub struct MonitorInfo {
    pub name: String,
    pub region: CaptureRegion,
    pub scale_factor: f32,
    pub is_primary: bool,
}

/// List connected monitors with their desktop placement
pub fn list_monitors() -> Result<Vec<MonitorInfo>> {
    let monitors = Monitor::all().context("Failed to get monitors")?;
    Ok(monitors
        .iter()
        .map(|m| MonitorInfo {
            name: m.name().to_string(),
            region: CaptureRegion::new(m.x(), m.y(), m.width(), m.height()),
            scale_factor: m.scale_factor(),
            is_primary: m.is_primary(),
        })
        .collect())
}

/// Capture the whole primary monitor, or the first one if none is flagged primary
pub fn capture_primary_frame() -> Result<RgbaImage> {
    let monitors = Monitor::all().context("Failed to get monitors")?;
    let monitor = monitors
        .iter()
        .find(|m| m.is_primary())
        .or(monitors.first())
        .context("No monitor found")?;

    tracing::debug!(monitor = monitor.name(), "Capturing primary monitor");
    let image = monitor.capture_image().context("Failed to capture screen")?;
    into_rgba(image.width(), image.height(), image.into_raw())
}

/// Capture a region given in desktop coordinates
pub fn capture_screen_region(region: CaptureRegion) -> Result<RgbaImage> {
    let monitors = Monitor::all().context("Failed to get monitors")?;

    let monitor = monitors
        .iter()
        .find(|m| {
            CaptureRegion::new(m.x(), m.y(), m.width(), m.height()).contains(&region)
        })
        .or(monitors.first())
        .context("No monitor found")?;

    let image = monitor.capture_image().context("Failed to capture screen")?;
    let frame = into_rgba(image.width(), image.height(), image.into_raw())?;

    let local = CaptureRegion::new(
        region.x - monitor.x(),
        region.y - monitor.y(),
        region.width,
        region.height,
    );
    crop(&frame, local).with_context(|| format!("Region {region} is outside monitor {}", monitor.name()))
}

/// Cut a region out of a frame; the region is clipped to the frame first
pub fn crop(frame: &RgbaImage, region: CaptureRegion) -> Option<RgbaImage> {
    let bounds = CaptureRegion::new(0, 0, frame.width(), frame.height());
    let region = bounds.intersect(&region)?;
    Some(
        image::imageops::crop_imm(
            frame,
            region.x as u32,
            region.y as u32,
            region.width,
            region.height,
        )
        .to_image(),
    )
}

// xcap bundles its own `image`; go through raw bytes so the two never have to match
fn into_rgba(width: u32, height: u32, raw: Vec<u8>) -> Result<RgbaImage> {
    RgbaImage::from_raw(width, height, raw).context("Captured buffer does not match its size")
}
