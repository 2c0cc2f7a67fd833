//! The real extractor pipeline.

use super::traits::{DetectionEngine, EngineKind};
use crate::core::frame::Frame;
use crate::core::signals::{
    analyze_artifacts, analyze_content_type, analyze_face_consistency,
    analyze_temporal_consistency, ArtifactAnalysis, ContentAnalysis, FaceAnalysis,
    TemporalAnalysis,
};
use crate::core::vision::{FaceDetector, SeetaFaceDetector};
use crate::error::{EngineError, ExtractionError};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Runs the four heuristic extractors against a face detector
pub struct HeuristicEngine {
    detector: Box<dyn FaceDetector>,
    released: AtomicBool,
}

impl HeuristicEngine {
    /// Use an already constructed face detector
    pub fn new(detector: Box<dyn FaceDetector>) -> Self {
        info!(detector = detector.name(), "Heuristic engine ready");
        Self {
            detector,
            released: AtomicBool::new(false),
        }
    }

    /// Load the SeetaFace model at `path`, failing fast if it cannot be read
    pub fn from_model(path: &Path) -> Result<Self, EngineError> {
        let detector = SeetaFaceDetector::load(path)?;
        Ok(Self::new(Box::new(detector)))
    }
}

impl DetectionEngine for HeuristicEngine {
    fn face_consistency(&self, frames: &[Frame]) -> Result<FaceAnalysis, ExtractionError> {
        Ok(analyze_face_consistency(frames, self.detector.as_ref()))
    }

    fn temporal_consistency(
        &self,
        frames: &[Frame],
    ) -> Result<TemporalAnalysis, ExtractionError> {
        analyze_temporal_consistency(frames)
    }

    fn artifacts(&self, frames: &[Frame]) -> Result<ArtifactAnalysis, ExtractionError> {
        analyze_artifacts(frames)
    }

    fn content_type(&self, frames: &[Frame]) -> Result<ContentAnalysis, ExtractionError> {
        analyze_content_type(frames, self.detector.as_ref())
    }

    fn cleanup(&self) {
        if self.released.swap(true, Ordering::SeqCst) {
            return;
        }
        self.detector.release();
        info!("Heuristic engine cleaned up");
    }

    fn kind(&self) -> EngineKind {
        EngineKind::Heuristic
    }
}
