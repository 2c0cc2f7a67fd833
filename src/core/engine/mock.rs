//! Deterministic engine that returns fixed signal values.

use super::traits::{DetectionEngine, EngineKind};
use crate::core::frame::Frame;
use crate::core::signals::{ArtifactAnalysis, ContentAnalysis, FaceAnalysis, TemporalAnalysis};
use crate::error::ExtractionError;

/// Fixed signals: face 0.8, temporal 0.85, artifacts 0.3, no animal content.
/// These fuse to a probability of 0.51.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockEngine;

const MOCK_TIME: f64 = 0.1;

impl MockEngine {
    pub fn new() -> Self {
        Self
    }
}

impl DetectionEngine for MockEngine {
    fn face_consistency(&self, _frames: &[Frame]) -> Result<FaceAnalysis, ExtractionError> {
        Ok(FaceAnalysis {
            face_consistency: 0.8,
            face_count: vec![1, 1],
            analysis_time: MOCK_TIME,
        })
    }

    fn temporal_consistency(
        &self,
        _frames: &[Frame],
    ) -> Result<TemporalAnalysis, ExtractionError> {
        Ok(TemporalAnalysis {
            frame_diff_score: 15.0,
            temporal_consistency: 0.85,
            pair_differences: vec![15.0],
            analysis_time: MOCK_TIME,
        })
    }

    fn artifacts(&self, _frames: &[Frame]) -> Result<ArtifactAnalysis, ExtractionError> {
        Ok(ArtifactAnalysis {
            ai_artifact_score: 0.3,
            individual_scores: vec![0.2, 0.4],
            breakdown: Vec::new(),
            analysis_time: MOCK_TIME,
        })
    }

    fn content_type(&self, _frames: &[Frame]) -> Result<ContentAnalysis, ExtractionError> {
        Ok(ContentAnalysis {
            is_animal_content: false,
            matched_frame: None,
            analysis_time: 0.0,
        })
    }

    fn kind(&self) -> EngineKind {
        EngineKind::Mock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_ignores_input() {
        let engine = MockEngine::new();
        let none = engine.face_consistency(&[]).unwrap();
        let some = engine
            .face_consistency(&[Frame::solid(4, 4, [0, 0, 0])])
            .unwrap();
        assert_eq!(none, some);
        assert_eq!(none.face_consistency, 0.8);
    }

    #[test]
    fn mock_reports_its_kind() {
        assert_eq!(MockEngine::new().kind(), EngineKind::Mock);
    }
}
