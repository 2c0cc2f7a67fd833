//! # Vision Module
//!
//! Low-level image primitives the signal extractors are built from.
//!
//! ## Primitives
//! - `pixels` - grayscale conversion, mean absolute difference
//! - `quality` - Laplacian variance, intensity statistics
//! - `edges` - Canny edge map and edge density
//! - `resize` - SIMD bilinear resize to a canonical size
//! - `frequency` - 2-D FFT magnitude spectrum and peak score
//! - `texture` - local binary pattern histogram
//! - `face` - face detector seam and the SeetaFace implementation
//!
//! Every primitive is a pure function of its input buffer.

pub mod edges;
pub mod face;
pub mod frequency;
pub mod pixels;
pub mod quality;
pub mod resize;
pub mod texture;

pub use edges::edge_density;
pub use face::{FaceDetector, SeetaFaceDetector};
pub use frequency::repetitive_pattern_score;
pub use pixels::{grayscale, mean_abs_difference};
pub use quality::{intensity_stats, laplacian_variance, IntensityStats, QualityMetrics};
pub use resize::{CanonicalResizer, CANONICAL_SIZE};
pub use texture::lbp_histogram;

use crate::core::frame::Frame;
use crate::error::ExtractionError;
use serde::{Deserialize, Serialize};

/// Per-frame diagnostics that do not feed the fusion formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameInspection {
    pub width: u32,
    pub height: u32,
    pub quality: QualityMetrics,
    pub edge_density: f64,
    pub repetitive_pattern_score: f64,
    pub lbp_histogram: Vec<u32>,
}

/// Run every diagnostic primitive over one frame
pub fn inspect_frame(frame: &Frame, index: usize) -> Result<FrameInspection, ExtractionError> {
    if frame.is_empty() {
        return Err(ExtractionError::EmptyFrame { index });
    }

    let gray = grayscale(frame);
    let edge_density = edge_density(&gray).ok_or(ExtractionError::EmptyFrame { index })?;

    Ok(FrameInspection {
        width: frame.width(),
        height: frame.height(),
        quality: QualityMetrics::measure(&gray),
        edge_density,
        repetitive_pattern_score: repetitive_pattern_score(&gray)?,
        lbp_histogram: lbp_histogram(&gray),
    })
}
