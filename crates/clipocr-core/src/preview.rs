/// Size at which an image is shown inside a preview area.
///
/// Images that already fit keep their size; larger ones are scaled down
/// keeping the aspect ratio. Returns `None` while the area is not laid out
/// yet (one pixel or less on either axis).
pub fn fit_within(image: (u32, u32), area: (u32, u32)) -> Option<(u32, u32)> {
    let (area_w, area_h) = area;
    if area_w <= 1 || area_h <= 1 {
        return None;
    }

    let (w, h) = image;
    if w == 0 || h == 0 {
        return None;
    }
    if w <= area_w && h <= area_h {
        return Some(image);
    }

    let scale = (area_w as f64 / w as f64).min(area_h as f64 / h as f64);
    let new_w = ((w as f64 * scale) as u32).max(1);
    let new_h = ((h as f64 * scale) as u32).max(1);
    Some((new_w, new_h))
}
