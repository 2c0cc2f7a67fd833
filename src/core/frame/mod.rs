//! # Frame Module
//!
//! The unit of analysis: an immutable 8-bit RGB pixel buffer.
//!
//! Frames are cheap to clone (the pixels sit behind an `Arc`) so a request's
//! frame sequence can be handed to several extractors running on worker
//! threads without copying. No extractor ever mutates a frame.

use image::{DynamicImage, ImageBuffer, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One decoded image in an analysis request
#[derive(Debug, Clone)]
pub struct Frame {
    image: Arc<RgbImage>,
}

impl Frame {
    /// Wrap an RGB buffer
    pub fn new(image: RgbImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }

    /// Convert any decoded image into an RGB frame
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self::new(image.to_rgb8())
    }

    /// A frame filled with a single colour
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        Self::new(ImageBuffer::from_pixel(width, height, Rgb(rgb)))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// True when the frame has no pixels at all
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Borrow the underlying pixels
    pub fn as_rgb(&self) -> &RgbImage {
        &self.image
    }
}

impl From<RgbImage> for Frame {
    fn from(image: RgbImage) -> Self {
        Self::new(image)
    }
}

impl From<DynamicImage> for Frame {
    fn from(image: DynamicImage) -> Self {
        Self::from_dynamic(image)
    }
}

/// Axis-aligned face bounding box in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Faces found in a single frame
pub type FaceSet = Vec<FaceBox>;

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn solid_frame_has_requested_colour() {
        let frame = Frame::solid(4, 3, [10, 20, 30]);
        assert_eq!(frame.dimensions(), (4, 3));
        assert!(frame.as_rgb().pixels().all(|p| p.0 == [10, 20, 30]));
    }

    #[test]
    fn zero_dimension_frame_is_empty() {
        assert!(Frame::solid(0, 10, [0, 0, 0]).is_empty());
        assert!(Frame::solid(10, 0, [0, 0, 0]).is_empty());
        assert!(!Frame::solid(1, 1, [0, 0, 0]).is_empty());
    }

    #[test]
    fn grayscale_input_is_expanded_to_rgb() {
        let gray: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::from_pixel(2, 2, Luma([77]));
        let frame = Frame::from_dynamic(DynamicImage::ImageLuma8(gray));
        assert_eq!(frame.as_rgb().get_pixel(1, 1).0, [77, 77, 77]);
    }

    #[test]
    fn clones_share_pixels() {
        let frame = Frame::solid(8, 8, [1, 2, 3]);
        let copy = frame.clone();
        assert!(std::ptr::eq(frame.as_rgb(), copy.as_rgb()));
    }
}
