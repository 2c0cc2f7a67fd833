//! Per-frame generation artifact heuristics.
//!
//! Each frame gets three sub-scores in 0.0-1.0 which are averaged:
//! - blur: Laplacian variance / 500, capped at 1
//! - edge: Canny edge density x 10, capped at 1
//! - texture: 1 - min(intensity stddev / 100, 1); flat texture scores high

use super::types::{elapsed_secs, ArtifactAnalysis, ArtifactBreakdown};
use crate::core::frame::Frame;
use crate::core::vision::{edge_density, grayscale, intensity_stats, laplacian_variance};
use crate::error::ExtractionError;
use std::time::Instant;

pub const BLUR_NORMALIZER: f64 = 500.0;
pub const EDGE_SCALE: f64 = 10.0;
pub const TEXTURE_NORMALIZER: f64 = 100.0;

/// Score a single frame
pub fn score_frame(frame: &Frame, index: usize) -> Result<ArtifactBreakdown, ExtractionError> {
    if frame.is_empty() {
        return Err(ExtractionError::EmptyFrame { index });
    }

    let gray = grayscale(frame);

    let blur_score = (laplacian_variance(&gray) / BLUR_NORMALIZER).min(1.0);

    let density = edge_density(&gray).ok_or(ExtractionError::EmptyFrame { index })?;
    let edge_score = (density * EDGE_SCALE).min(1.0);

    let texture_std = intensity_stats(&gray).std_dev;
    let texture_score = 1.0 - (texture_std / TEXTURE_NORMALIZER).min(1.0);

    Ok(ArtifactBreakdown {
        blur_score,
        edge_score,
        texture_score,
    })
}

/// Score every frame and average the results
pub fn analyze_artifacts(frames: &[Frame]) -> Result<ArtifactAnalysis, ExtractionError> {
    if frames.is_empty() {
        return Err(ExtractionError::NoFrames {
            extractor: "artifact",
        });
    }

    let start = Instant::now();

    let breakdown = frames
        .iter()
        .enumerate()
        .map(|(index, frame)| score_frame(frame, index))
        .collect::<Result<Vec<_>, _>>()?;

    let individual_scores: Vec<f64> = breakdown.iter().map(ArtifactBreakdown::combined).collect();
    let ai_artifact_score = individual_scores.iter().sum::<f64>() / individual_scores.len() as f64;

    Ok(ArtifactAnalysis {
        ai_artifact_score,
        individual_scores,
        breakdown,
        analysis_time: elapsed_secs(start),
    })
}
