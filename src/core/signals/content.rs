//! Animal-versus-human content heuristic.
//!
//! Face detectors are unreliable on animal faces, so a face-free frame with
//! moderate edge density is taken as a hint that the subject is an animal.

use super::face::count_faces;
use super::types::{elapsed_secs, ContentAnalysis};
use crate::core::frame::Frame;
use crate::core::vision::{edge_density, grayscale, FaceDetector};
use crate::error::ExtractionError;
use std::time::Instant;

/// Exclusive edge-density range treated as animal-like
pub const ANIMAL_EDGE_DENSITY_MIN: f64 = 0.05;
pub const ANIMAL_EDGE_DENSITY_MAX: f64 = 0.2;

/// Scan frames in order and stop at the first face-free frame whose edge
/// density lies strictly inside the animal range.
pub fn analyze_content_type(
    frames: &[Frame],
    detector: &dyn FaceDetector,
) -> Result<ContentAnalysis, ExtractionError> {
    let start = Instant::now();
    let mut matched_frame = None;

    for (index, frame) in frames.iter().enumerate() {
        if count_faces(frame, index, detector) > 0 {
            continue;
        }

        let density =
            edge_density(&grayscale(frame)).ok_or(ExtractionError::EmptyFrame { index })?;

        if is_animal_edge_density(density) {
            matched_frame = Some(index);
            break;
        }
    }

    Ok(ContentAnalysis {
        is_animal_content: matched_frame.is_some(),
        matched_frame,
        analysis_time: elapsed_secs(start),
    })
}

pub fn is_animal_edge_density(density: f64) -> bool {
    density > ANIMAL_EDGE_DENSITY_MIN && density < ANIMAL_EDGE_DENSITY_MAX
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frame::{FaceBox, FaceSet};
    use crate::error::FaceDetectionError;
    use image::{GrayImage, ImageBuffer, Rgb};

    struct NoFaces;

    impl FaceDetector for NoFaces {
        fn detect(&self, _gray: &GrayImage) -> Result<FaceSet, FaceDetectionError> {
            Ok(Vec::new())
        }

        fn name(&self) -> &'static str {
            "none"
        }
    }

    struct OneFace;

    impl FaceDetector for OneFace {
        fn detect(&self, _gray: &GrayImage) -> Result<FaceSet, FaceDetectionError> {
            Ok(vec![FaceBox {
                x: 4,
                y: 4,
                width: 32,
                height: 32,
            }])
        }

        fn name(&self) -> &'static str {
            "one"
        }
    }

    /// Vertical black/white stripes 16 px wide: a handful of long edges
    fn striped(size: u32) -> Frame {
        Frame::new(ImageBuffer::from_fn(size, size, |x, _| {
            if (x / 16) % 2 == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        }))
    }

    #[test]
    fn range_is_exclusive() {
        assert!(!is_animal_edge_density(0.05));
        assert!(is_animal_edge_density(0.1));
        assert!(!is_animal_edge_density(0.2));
        assert!(!is_animal_edge_density(0.0));
    }

    #[test]
    fn flat_frames_are_not_animal() {
        let frames = vec![Frame::solid(64, 64, [0, 50, 150]); 3];
        let analysis = analyze_content_type(&frames, &NoFaces).unwrap();

        assert!(!analysis.is_animal_content);
        assert_eq!(analysis.matched_frame, None);
    }

    #[test]
    fn moderate_edges_without_faces_are_animal() {
        let frames = vec![Frame::solid(128, 128, [10, 10, 10]), striped(128)];
        let analysis = analyze_content_type(&frames, &NoFaces).unwrap();

        assert!(analysis.is_animal_content);
        assert_eq!(analysis.matched_frame, Some(1));
    }

    #[test]
    fn frames_with_faces_are_skipped() {
        let frames = vec![striped(128), striped(128)];
        let analysis = analyze_content_type(&frames, &OneFace).unwrap();

        assert!(!analysis.is_animal_content);
    }

    #[test]
    fn empty_frame_without_faces_is_fatal() {
        let frames = vec![Frame::solid(0, 0, [0, 0, 0])];
        assert!(analyze_content_type(&frames, &NoFaces).is_err());
    }

    #[test]
    fn scan_stops_before_a_later_empty_frame() {
        let frames = vec![striped(128), Frame::solid(0, 0, [0, 0, 0])];
        let analysis = analyze_content_type(&frames, &NoFaces).unwrap();

        assert!(analysis.is_animal_content);
        assert_eq!(analysis.matched_frame, Some(0));
    }
}
