//! Temporal consistency between adjacent frames.

use super::types::{elapsed_secs, TemporalAnalysis};
use crate::core::frame::Frame;
use crate::core::vision::{mean_abs_difference, CanonicalResizer};
use crate::error::ExtractionError;
use std::time::Instant;

/// Average difference, in intensity units, at which consistency reaches 0
pub const DIFF_NORMALIZER: f64 = 100.0;

/// Compare each adjacent pair of frames at a canonical size.
///
/// Fewer than two frames yields a perfect-consistency default.
pub fn analyze_temporal_consistency(frames: &[Frame]) -> Result<TemporalAnalysis, ExtractionError> {
    if frames.len() < 2 {
        return Ok(TemporalAnalysis {
            frame_diff_score: 0.0,
            temporal_consistency: 1.0,
            pair_differences: Vec::new(),
            analysis_time: 0.0,
        });
    }

    let start = Instant::now();
    let mut resizer = CanonicalResizer::new();

    let normalized = frames
        .iter()
        .enumerate()
        .map(|(index, frame)| resizer.resize(frame, index))
        .collect::<Result<Vec<_>, _>>()?;

    let pair_differences = normalized
        .windows(2)
        .map(|pair| mean_abs_difference(&pair[0], &pair[1]))
        .collect::<Result<Vec<_>, _>>()?;

    let frame_diff_score = pair_differences.iter().sum::<f64>() / pair_differences.len() as f64;

    Ok(TemporalAnalysis {
        frame_diff_score,
        temporal_consistency: consistency_from_difference(frame_diff_score),
        pair_differences,
        analysis_time: elapsed_secs(start),
    })
}

/// `1 - min(avg_diff / 100, 1)`
pub fn consistency_from_difference(avg_diff: f64) -> f64 {
    1.0 - (avg_diff / DIFF_NORMALIZER).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_frame_is_perfectly_consistent() {
        let analysis = analyze_temporal_consistency(&[Frame::solid(10, 10, [1, 2, 3])]).unwrap();
        assert_eq!(analysis.frame_diff_score, 0.0);
        assert_eq!(analysis.temporal_consistency, 1.0);
    }

    #[test]
    fn no_frames_is_perfectly_consistent() {
        let analysis = analyze_temporal_consistency(&[]).unwrap();
        assert_eq!(analysis.temporal_consistency, 1.0);
    }

    #[test]
    fn identical_frames_have_zero_difference() {
        let frame = Frame::solid(120, 80, [40, 90, 200]);
        let analysis =
            analyze_temporal_consistency(&[frame.clone(), frame.clone(), frame]).unwrap();

        assert_eq!(analysis.frame_diff_score, 0.0);
        assert_eq!(analysis.temporal_consistency, 1.0);
        assert_eq!(analysis.pair_differences, vec![0.0, 0.0]);
    }

    #[test]
    fn differences_are_size_invariant() {
        // Same colours at different sizes produce the same score
        let small = analyze_temporal_consistency(&[
            Frame::solid(50, 50, [0, 0, 0]),
            Frame::solid(50, 50, [60, 60, 60]),
        ])
        .unwrap();
        let mixed = analyze_temporal_consistency(&[
            Frame::solid(300, 100, [0, 0, 0]),
            Frame::solid(40, 90, [60, 60, 60]),
        ])
        .unwrap();

        assert!((small.frame_diff_score - 60.0).abs() < 0.5);
        assert!((small.frame_diff_score - mixed.frame_diff_score).abs() < 0.5);
    }

    #[test]
    fn consistency_is_capped_at_zero() {
        let analysis = analyze_temporal_consistency(&[
            Frame::solid(20, 20, [0, 0, 0]),
            Frame::solid(20, 20, [255, 255, 255]),
        ])
        .unwrap();

        assert!(analysis.frame_diff_score > 250.0);
        assert_eq!(analysis.temporal_consistency, 0.0);
    }

    #[test]
    fn empty_frame_is_fatal() {
        let result = analyze_temporal_consistency(&[
            Frame::solid(20, 20, [0, 0, 0]),
            Frame::solid(0, 20, [0, 0, 0]),
        ]);
        assert_eq!(result.unwrap_err(), ExtractionError::EmptyFrame { index: 1 });
    }

    #[test]
    fn consistency_formula() {
        assert_eq!(consistency_from_difference(0.0), 1.0);
        assert!((consistency_from_difference(25.0) - 0.75).abs() < 1e-12);
        assert_eq!(consistency_from_difference(400.0), 0.0);
    }
}
