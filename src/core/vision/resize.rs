//! Resizing to the canonical comparison size.
//!
//! Backed by fast_image_resize, which picks AVX2/NEON paths when available.

use crate::core::frame::Frame;
use crate::error::ExtractionError;
use fast_image_resize::{images::Image, PixelType, ResizeOptions, Resizer};
use image::{ImageBuffer, RgbImage};

/// Side length frames are normalized to before pixel comparison
pub const CANONICAL_SIZE: u32 = 256;

fn resize_error(reason: String) -> ExtractionError {
    ExtractionError::Primitive {
        primitive: "resize",
        reason,
    }
}

/// Resizes RGB frames to a fixed size, reusing its internal buffers
pub struct CanonicalResizer {
    resizer: Resizer,
    size: u32,
}

impl CanonicalResizer {
    /// Resizer targeting `CANONICAL_SIZE` x `CANONICAL_SIZE`
    pub fn new() -> Self {
        Self::with_size(CANONICAL_SIZE)
    }

    pub fn with_size(size: u32) -> Self {
        Self {
            resizer: Resizer::new(),
            size,
        }
    }

    /// Resize a frame to `size` x `size` RGB with a bilinear filter.
    ///
    /// Frames already at the target size are copied unchanged.
    pub fn resize(&mut self, frame: &Frame, index: usize) -> Result<RgbImage, ExtractionError> {
        if frame.is_empty() {
            return Err(ExtractionError::EmptyFrame { index });
        }
        if self.size == 0 {
            return Err(resize_error("Invalid destination dimensions".to_string()));
        }

        let (src_width, src_height) = frame.dimensions();
        if src_width == self.size && src_height == self.size {
            return Ok(frame.as_rgb().clone());
        }

        let src_image = Image::from_vec_u8(
            src_width,
            src_height,
            frame.as_rgb().as_raw().clone(),
            PixelType::U8x3,
        )
        .map_err(|e| resize_error(format!("Failed to create source image: {}", e)))?;

        let mut dst_image = Image::new(self.size, self.size, PixelType::U8x3);

        let options = ResizeOptions::new().resize_alg(fast_image_resize::ResizeAlg::Convolution(
            fast_image_resize::FilterType::Bilinear,
        ));

        self.resizer
            .resize(&src_image, &mut dst_image, &options)
            .map_err(|e| resize_error(format!("Resize failed: {}", e)))?;

        ImageBuffer::from_raw(self.size, self.size, dst_image.into_vec())
            .ok_or_else(|| resize_error("Failed to create result buffer".to_string()))
    }
}

impl Default for CanonicalResizer {
    fn default() -> Self {
        Self::new()
    }
}
