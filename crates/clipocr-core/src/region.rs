use clipocr_types::CaptureRegion;

/// Map a selection drawn on a scaled view of a frame onto frame pixels.
///
/// The overlay shows the frozen frame stretched over the whole window, so its
/// logical size rarely matches the frame's pixel size (HiDPI, scaling). The
/// result is clamped to the frame and is `None` when nothing is left.
pub fn scale_to_frame(
    selection: CaptureRegion,
    view_size: (f32, f32),
    frame_size: (u32, u32),
) -> Option<CaptureRegion> {
    let (view_w, view_h) = view_size;
    if selection.is_empty() || view_w <= 0.0 || view_h <= 0.0 {
        return None;
    }

    let sx = frame_size.0 as f64 / view_w as f64;
    let sy = frame_size.1 as f64 / view_h as f64;

    let left = (selection.x as f64 * sx).floor() as i64;
    let top = (selection.y as f64 * sy).floor() as i64;
    let right = (selection.right() as f64 * sx).ceil() as i64;
    let bottom = (selection.bottom() as f64 * sy).ceil() as i64;

    let scaled = CaptureRegion::new(
        left.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        top.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        (right - left).clamp(0, u32::MAX as i64) as u32,
        (bottom - top).clamp(0, u32::MAX as i64) as u32,
    );

    CaptureRegion::new(0, 0, frame_size.0, frame_size.1).intersect(&scaled)
}
