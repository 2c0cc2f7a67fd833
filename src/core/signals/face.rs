//! Face consistency across frames.
//!
//! Counts faces per frame and scores how stable that count is. A frame whose
//! detection fails counts as having no faces.

use super::types::{elapsed_secs, FaceAnalysis};
use crate::core::frame::Frame;
use crate::core::vision::{grayscale, FaceDetector};
use std::time::Instant;
use tracing::warn;

/// Score returned when no frame contains a face
pub const NO_FACES_SCORE: f64 = 0.5;

/// Detect faces in every frame and score the consistency of the counts
pub fn analyze_face_consistency(frames: &[Frame], detector: &dyn FaceDetector) -> FaceAnalysis {
    let start = Instant::now();

    let face_count: Vec<usize> = frames
        .iter()
        .enumerate()
        .map(|(index, frame)| count_faces(frame, index, detector))
        .collect();

    FaceAnalysis {
        face_consistency: face_consistency(&face_count),
        face_count,
        analysis_time: elapsed_secs(start),
    }
}

/// Faces in one frame, degrading any detector failure to zero
pub(crate) fn count_faces(frame: &Frame, index: usize, detector: &dyn FaceDetector) -> usize {
    match detector.detect(&grayscale(frame)) {
        Ok(faces) => faces.len(),
        Err(e) => {
            warn!(frame = index, detector = detector.name(), error = %e, "Face detection failed, counting zero faces");
            0
        }
    }
}

/// Consistency of per-frame face counts.
///
/// - no frames, or no faces in any frame: 0.5
/// - a single frame: 1.0
/// - otherwise `1 - stddev / max`, using the population standard deviation
pub fn face_consistency(counts: &[usize]) -> f64 {
    if counts.iter().all(|&c| c == 0) {
        return NO_FACES_SCORE;
    }
    if counts.len() == 1 {
        return 1.0;
    }

    let max_count = counts.iter().copied().max().unwrap_or(0);
    if max_count == 0 {
        return 1.0;
    }

    let n = counts.len() as f64;
    let mean = counts.iter().map(|&c| c as f64).sum::<f64>() / n;
    let variance = counts
        .iter()
        .map(|&c| (c as f64 - mean).powi(2))
        .sum::<f64>()
        / n;

    1.0 - variance.sqrt() / max_count as f64
}
