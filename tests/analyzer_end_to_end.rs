//! End-to-end tests for the analysis orchestrator.

use aitube_detector::core::analyzer::{Analyzer, LIMITATIONS};
use aitube_detector::core::engine::{DetectionEngine, EngineKind, HeuristicEngine, MockEngine};
use aitube_detector::core::frame::{FaceSet, Frame};
use aitube_detector::core::fusion::ConfidenceLevel;
use aitube_detector::core::signals::{
    ArtifactAnalysis, ContentAnalysis, FaceAnalysis, TemporalAnalysis,
};
use aitube_detector::core::vision::FaceDetector;
use aitube_detector::error::{AnalysisError, ExtractionError, FaceDetectionError};
use aitube_detector::events::{event_channel, AnalysisEvent, Event};
use image::{GrayImage, RgbImage};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Detector that never finds a face
struct NoFaces;

impl FaceDetector for NoFaces {
    fn detect(&self, _gray: &GrayImage) -> Result<FaceSet, FaceDetectionError> {
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        "no-faces"
    }
}

fn heuristic_analyzer() -> Analyzer {
    Analyzer::builder()
        .engine(Arc::new(HeuristicEngine::new(Box::new(NoFaces))))
        .timeout(Duration::from_secs(30))
        .build()
}

fn solid_sequence() -> Vec<Frame> {
    vec![
        Frame::solid(200, 200, [0, 50, 150]),
        Frame::solid(200, 200, [100, 50, 150]),
        Frame::solid(200, 200, [200, 50, 150]),
    ]
}

#[test]
fn solid_color_sequence_matches_formula() {
    let envelope = heuristic_analyzer().analyze(&solid_sequence()).unwrap();
    let details = &envelope.analysis_details;

    assert_eq!(details.face_analysis.face_consistency, 0.5);
    assert_eq!(details.face_analysis.face_count, vec![0, 0, 0]);

    // Only the red channel moves, by 100 per step
    let expected_diff = 100.0 / 3.0;
    assert!((details.frame_analysis.frame_diff_score - expected_diff).abs() < 1e-9);
    assert_eq!(details.frame_analysis.pair_differences.len(), 2);
    let temporal = details.frame_analysis.temporal_consistency;
    assert!((temporal - (1.0 - expected_diff / 100.0)).abs() < 1e-9);

    // Solid frames: no blur response, no edges, perfectly uniform texture
    let artifacts = details.artifact_analysis.ai_artifact_score;
    assert!((artifacts - 1.0 / 3.0).abs() < 1e-9);
    assert!(!details.is_animal_content);

    let expected = 0.5 * 0.25 + temporal * 0.30 + artifacts * 0.35 + 0.10;
    assert_eq!(envelope.ai_probability(), (expected * 1000.0).round() / 1000.0);
    assert_eq!(envelope.ai_probability(), 0.542);
    assert!(!envelope.is_ai_generated());
    assert_eq!(envelope.confidence_level(), ConfidenceLevel::Medium);

    assert_eq!(
        envelope.recommendations,
        vec![
            "Content appears to be authentic",
            "Some AI-like characteristics detected - consider manual review"
        ]
    );
    assert_eq!(envelope.limitations, LIMITATIONS.to_vec());
    assert_eq!(details.engine, EngineKind::Heuristic);
    assert!(envelope.total_processing_time >= 0.0);
}

#[test]
fn repeated_analysis_is_identical_apart_from_timings() {
    let analyzer = heuristic_analyzer();
    let frames = solid_sequence();

    let first = analyzer.analyze(&frames).unwrap();
    let second = analyzer.analyze(&frames).unwrap();

    assert_eq!(first.without_timings(), second.without_timings());
}

#[test]
fn concurrent_requests_share_one_analyzer() {
    let analyzer = Arc::new(heuristic_analyzer());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let analyzer = Arc::clone(&analyzer);
            thread::spawn(move || analyzer.analyze(&solid_sequence()).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().ai_probability(), 0.542);
    }
}

#[test]
fn empty_frame_aborts_the_whole_request() {
    let frames = vec![
        Frame::solid(64, 64, [10, 10, 10]),
        Frame::new(RgbImage::new(0, 0)),
    ];

    let result = heuristic_analyzer().analyze(&frames);

    assert!(matches!(
        result,
        Err(AnalysisError::Extraction(ExtractionError::EmptyFrame { index: 1 }))
    ));
}

#[test]
fn failure_is_reported_as_event() {
    let (sender, receiver) = event_channel();
    let frames = vec![Frame::new(RgbImage::new(0, 0))];

    let result = heuristic_analyzer().analyze_with_events(&frames, &sender);
    drop(sender);

    assert!(result.is_err());
    assert!(receiver
        .iter()
        .any(|e| matches!(e, Event::Analysis(AnalysisEvent::Failed { .. }))));
}

#[test]
fn single_frame_is_accepted() {
    let envelope = heuristic_analyzer()
        .analyze(&[Frame::solid(50, 50, [30, 60, 90])])
        .unwrap();

    assert_eq!(envelope.analysis_details.frame_analysis.frame_diff_score, 0.0);
    assert_eq!(envelope.analysis_details.frame_analysis.temporal_consistency, 1.0);
}

/// Engine with caller-chosen signal values
struct FixedEngine {
    face_consistency: f64,
    temporal_consistency: f64,
    artifact_score: f64,
    animal: bool,
    delay: Duration,
}

impl FixedEngine {
    fn new(face: f64, temporal: f64, artifacts: f64, animal: bool) -> Self {
        Self {
            face_consistency: face,
            temporal_consistency: temporal,
            artifact_score: artifacts,
            animal,
            delay: Duration::ZERO,
        }
    }
}

impl DetectionEngine for FixedEngine {
    fn face_consistency(&self, frames: &[Frame]) -> Result<FaceAnalysis, ExtractionError> {
        thread::sleep(self.delay);
        Ok(FaceAnalysis {
            face_consistency: self.face_consistency,
            face_count: vec![0; frames.len()],
            analysis_time: 0.0,
        })
    }

    fn temporal_consistency(
        &self,
        _frames: &[Frame],
    ) -> Result<TemporalAnalysis, ExtractionError> {
        Ok(TemporalAnalysis {
            frame_diff_score: 0.0,
            temporal_consistency: self.temporal_consistency,
            pair_differences: Vec::new(),
            analysis_time: 0.0,
        })
    }

    fn artifacts(&self, _frames: &[Frame]) -> Result<ArtifactAnalysis, ExtractionError> {
        Ok(ArtifactAnalysis {
            ai_artifact_score: self.artifact_score,
            individual_scores: Vec::new(),
            breakdown: Vec::new(),
            analysis_time: 0.0,
        })
    }

    fn content_type(&self, _frames: &[Frame]) -> Result<ContentAnalysis, ExtractionError> {
        Ok(ContentAnalysis {
            is_animal_content: self.animal,
            matched_frame: self.animal.then_some(0),
            analysis_time: 0.0,
        })
    }

    fn kind(&self) -> EngineKind {
        EngineKind::Heuristic
    }
}

#[test]
fn ai_verdict_on_animal_content_puts_caveat_last() {
    let analyzer = Analyzer::builder()
        .engine(Arc::new(FixedEngine::new(0.0, 1.0, 1.0, true)))
        .build();

    let envelope = analyzer.analyze(&[Frame::solid(8, 8, [0, 0, 0])]).unwrap();

    assert_eq!(envelope.ai_probability(), 0.9);
    assert!(envelope.is_ai_generated());
    assert_eq!(envelope.confidence_level(), ConfidenceLevel::High);
    assert_eq!(
        envelope.recommendations,
        vec![
            "Content likely AI-generated - verify authenticity",
            "Animal content detected - AI detection less reliable"
        ]
    );
}

#[test]
fn slow_engine_times_out() {
    let mut engine = FixedEngine::new(1.0, 0.0, 0.0, false);
    engine.delay = Duration::from_millis(500);
    let analyzer = Analyzer::builder()
        .engine(Arc::new(engine))
        .timeout(Duration::from_millis(50))
        .build();
    let (sender, receiver) = event_channel();

    let result = analyzer.analyze_with_events(&[Frame::solid(8, 8, [0, 0, 0])], &sender);

    match result {
        Err(AnalysisError::Timeout { budget }) => {
            assert_eq!(budget, Duration::from_millis(50))
        }
        other => panic!("expected timeout, got {other:?}"),
    }

    // The abandoned job still holds a sender, so only look at what is queued
    assert!(receiver
        .drain()
        .iter()
        .any(|e| matches!(e, Event::Analysis(AnalysisEvent::TimedOut))));
}

/// Engine whose extractors sleep for `delay` while `slow` is set
struct SwitchableEngine {
    slow: AtomicBool,
    delay: Duration,
}

impl SwitchableEngine {
    fn pause(&self) {
        if self.slow.load(Ordering::SeqCst) {
            thread::sleep(self.delay);
        }
    }
}

impl DetectionEngine for SwitchableEngine {
    fn face_consistency(&self, frames: &[Frame]) -> Result<FaceAnalysis, ExtractionError> {
        self.pause();
        MockEngine::new().face_consistency(frames)
    }

    fn temporal_consistency(&self, frames: &[Frame]) -> Result<TemporalAnalysis, ExtractionError> {
        self.pause();
        MockEngine::new().temporal_consistency(frames)
    }

    fn artifacts(&self, frames: &[Frame]) -> Result<ArtifactAnalysis, ExtractionError> {
        self.pause();
        MockEngine::new().artifacts(frames)
    }

    fn content_type(&self, frames: &[Frame]) -> Result<ContentAnalysis, ExtractionError> {
        self.pause();
        MockEngine::new().content_type(frames)
    }

    fn kind(&self) -> EngineKind {
        EngineKind::Mock
    }
}

#[test]
fn abandoned_request_does_not_delay_the_next_one() {
    let engine = Arc::new(SwitchableEngine {
        slow: AtomicBool::new(true),
        delay: Duration::from_millis(1500),
    });
    let analyzer = Analyzer::builder()
        .engine(Arc::clone(&engine) as Arc<dyn DetectionEngine>)
        .timeout(Duration::from_millis(300))
        .build();
    let frames = [Frame::solid(8, 8, [0, 0, 0])];

    assert!(matches!(
        analyzer.analyze(&frames),
        Err(AnalysisError::Timeout { .. })
    ));

    // The first request's extractors are still sleeping at this point
    engine.slow.store(false, Ordering::SeqCst);
    let envelope = analyzer.analyze(&frames).unwrap();
    assert_eq!(envelope.ai_probability(), 0.51);
}

#[test]
fn concurrent_requests_each_get_the_full_budget() {
    let engine = Arc::new(SwitchableEngine {
        slow: AtomicBool::new(true),
        delay: Duration::from_millis(200),
    });
    // Sharing two workers, eight requests would need several seconds of
    // pool time in total
    let analyzer = Arc::new(
        Analyzer::builder()
            .engine(engine)
            .timeout(Duration::from_millis(1500))
            .build(),
    );

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let analyzer = Arc::clone(&analyzer);
            thread::spawn(move || analyzer.analyze(&[Frame::solid(8, 8, [0, 0, 0])]))
        })
        .collect();

    for handle in handles {
        let result = handle.join().unwrap();
        assert!(result.is_ok(), "request failed: {:?}", result.err());
    }
}
