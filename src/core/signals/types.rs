//! Signal result records.

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Output of the face consistency extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceAnalysis {
    /// 1.0 = face counts identical across frames, 0.5 = no faces anywhere
    pub face_consistency: f64,
    /// Faces found per frame, in frame order
    pub face_count: Vec<usize>,
    /// Extraction time in seconds
    pub analysis_time: f64,
}

/// Output of the temporal consistency extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalAnalysis {
    /// Average mean-absolute difference across adjacent pairs (unbounded, >= 0)
    pub frame_diff_score: f64,
    /// 1 - min(frame_diff_score / 100, 1)
    pub temporal_consistency: f64,
    /// Mean-absolute difference of each adjacent pair
    pub pair_differences: Vec<f64>,
    /// Extraction time in seconds
    pub analysis_time: f64,
}

/// Blur, edge and texture sub-scores of one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArtifactBreakdown {
    pub blur_score: f64,
    pub edge_score: f64,
    pub texture_score: f64,
}

impl ArtifactBreakdown {
    /// Unweighted mean of the three sub-scores
    pub fn combined(&self) -> f64 {
        (self.blur_score + self.edge_score + self.texture_score) / 3.0
    }
}

/// Output of the artifact extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactAnalysis {
    /// Mean of the per-frame scores (0.0-1.0)
    pub ai_artifact_score: f64,
    /// Per-frame combined scores, in frame order
    pub individual_scores: Vec<f64>,
    /// Per-frame sub-scores, in frame order
    pub breakdown: Vec<ArtifactBreakdown>,
    /// Extraction time in seconds
    pub analysis_time: f64,
}

/// Output of the content-type heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    /// True when some face-free frame has animal-like edge density
    pub is_animal_content: bool,
    /// Index of the frame that triggered the flag
    pub matched_frame: Option<usize>,
    /// Extraction time in seconds
    pub analysis_time: f64,
}

/// Which extractor a result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    FaceConsistency,
    TemporalConsistency,
    Artifacts,
    ContentType,
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalKind::FaceConsistency => write!(f, "face consistency"),
            SignalKind::TemporalConsistency => write!(f, "temporal consistency"),
            SignalKind::Artifacts => write!(f, "artifacts"),
            SignalKind::ContentType => write!(f, "content type"),
        }
    }
}

/// Seconds elapsed since `start`
pub(crate) fn elapsed_secs(start: Instant) -> f64 {
    start.elapsed().as_secs_f64()
}
