//! Grayscale conversion and pixel-wise differencing.

use crate::core::frame::Frame;
use crate::error::ExtractionError;
use image::{GrayImage, ImageBuffer, Luma, RgbImage};

// BT.601 luma weights in 14-bit fixed point; they sum to 1 << 14
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// BT.601 luma conversion of a frame, rounded half up
pub fn grayscale(frame: &Frame) -> GrayImage {
    let rgb = frame.as_rgb();
    ImageBuffer::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let weighted = r as u32 * R_WEIGHT + g as u32 * G_WEIGHT + b as u32 * B_WEIGHT;
        Luma([((weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8])
    })
}

/// Mean absolute difference over every channel sample of two equally sized buffers.
pub fn mean_abs_difference(a: &RgbImage, b: &RgbImage) -> Result<f64, ExtractionError> {
    if a.dimensions() != b.dimensions() {
        return Err(ExtractionError::Primitive {
            primitive: "absdiff",
            reason: format!(
                "Buffer sizes differ: {:?} vs {:?}",
                a.dimensions(),
                b.dimensions()
            ),
        });
    }

    let samples = a.as_raw().len();
    if samples == 0 {
        return Ok(0.0);
    }

    let total: u64 = a
        .as_raw()
        .iter()
        .zip(b.as_raw())
        .map(|(&x, &y)| x.abs_diff(y) as u64)
        .sum();

    Ok(total as f64 / samples as f64)
}
