//! Edge-map extraction and edge density.

use image::GrayImage;
use imageproc::edges::canny;

/// Canny hysteresis thresholds
pub const CANNY_LOW_THRESHOLD: f32 = 50.0;
pub const CANNY_HIGH_THRESHOLD: f32 = 150.0;

/// Binary edge map (255 = edge) using fixed Canny thresholds
pub fn edge_map(gray: &GrayImage) -> GrayImage {
    canny(gray, CANNY_LOW_THRESHOLD, CANNY_HIGH_THRESHOLD)
}

/// Fraction of pixels classified as edges (0.0-1.0)
///
/// Returns `None` for a buffer without pixels.
pub fn edge_density(gray: &GrayImage) -> Option<f64> {
    let total = gray.width() as u64 * gray.height() as u64;
    if total == 0 {
        return None;
    }

    let edges = edge_map(gray).pixels().filter(|p| p[0] > 0).count();
    Some(edges as f64 / total as f64)
}
