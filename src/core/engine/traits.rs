//! Trait definitions for detection engines.

use crate::core::frame::Frame;
use crate::core::signals::{ArtifactAnalysis, ContentAnalysis, FaceAnalysis, TemporalAnalysis};
use crate::error::ExtractionError;
use serde::{Deserialize, Serialize};

/// Available engine implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Fixed signal values, no image work. For tests and demos.
    Mock,
    /// The real extractor pipeline
    Heuristic,
}

impl EngineKind {
    /// Get a human-readable description of the engine
    pub fn description(&self) -> &'static str {
        match self {
            EngineKind::Mock => "Mock engine - fixed signal values, no image analysis",
            EngineKind::Heuristic => {
                "Heuristic engine - face, temporal, artifact and content-type extractors"
            }
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineKind::Mock => write!(f, "mock"),
            EngineKind::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// Produces the four signals for a frame sequence.
///
/// Every method is independent of the others and must not keep state between
/// calls, so an orchestrator can run them concurrently.
pub trait DetectionEngine: Send + Sync {
    /// Face count consistency. Per-frame detection failures are recovered
    /// inside the engine.
    fn face_consistency(&self, frames: &[Frame]) -> Result<FaceAnalysis, ExtractionError>;

    /// Adjacent-frame pixel consistency
    fn temporal_consistency(&self, frames: &[Frame])
        -> Result<TemporalAnalysis, ExtractionError>;

    /// Blur/edge/texture artifact score
    fn artifacts(&self, frames: &[Frame]) -> Result<ArtifactAnalysis, ExtractionError>;

    /// Animal-versus-human content flag
    fn content_type(&self, frames: &[Frame]) -> Result<ContentAnalysis, ExtractionError>;

    /// Release held resources. Safe to call repeatedly.
    fn cleanup(&self) {}

    /// Get the engine kind
    fn kind(&self) -> EngineKind;
}
