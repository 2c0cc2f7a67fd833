//! Analysis execution.

use super::envelope::{limitations, AnalysisDetails, AnalysisEnvelope};
use crate::core::config::{AnalysisConfig, DEFAULT_TIMEOUT, DEFAULT_WORKERS};
use crate::core::engine::{create_engine, DetectionEngine, EngineKind, MockEngine};
use crate::core::frame::Frame;
use crate::core::fusion::{fuse, FusionInputs};
use crate::core::recommend::recommendation_messages;
use crate::core::signals::{
    ArtifactAnalysis, ContentAnalysis, FaceAnalysis, SignalKind, TemporalAnalysis,
};
use crate::error::{AnalysisError, DetectorError, ExtractionError};
use crate::events::{null_sender, AnalysisEvent, Event, EventSender};
use crossbeam_channel::RecvTimeoutError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Raw output of the four extractors
struct Signals {
    face: FaceAnalysis,
    temporal: TemporalAnalysis,
    artifacts: ArtifactAnalysis,
    content: ContentAnalysis,
}

/// Builder for an [`Analyzer`]
pub struct AnalyzerBuilder {
    engine: Option<Arc<dyn DetectionEngine>>,
    timeout: Duration,
    workers: usize,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            engine: None,
            timeout: DEFAULT_TIMEOUT,
            workers: DEFAULT_WORKERS,
        }
    }

    /// Set the engine. Defaults to [`MockEngine`].
    pub fn engine(mut self, engine: Arc<dyn DetectionEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Set the per-analysis time budget
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of worker threads (at least 1)
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn build(self) -> Analyzer {
        Analyzer {
            engine: self
                .engine
                .unwrap_or_else(|| Arc::new(MockEngine::new())),
            workers: self.workers,
            timeout: self.timeout,
        }
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the extractors, fuses their output and assembles the envelope.
///
/// Holds no per-request state; one analyzer serves any number of requests.
/// Each request gets its own worker pool, so a slow or abandoned request
/// never delays another one.
pub struct Analyzer {
    engine: Arc<dyn DetectionEngine>,
    workers: usize,
    timeout: Duration,
}

impl Analyzer {
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Construct the configured engine and an analyzer around it
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, DetectorError> {
        let engine = create_engine(config)?;
        info!(
            engine = %engine.kind(),
            face_model = ?config.face_model,
            workers = config.workers,
            "Detection engine initialized"
        );
        Ok(Self::builder()
            .engine(engine)
            .timeout(config.timeout)
            .workers(config.workers)
            .build())
    }

    pub fn engine_kind(&self) -> EngineKind {
        self.engine.kind()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Analyze without progress reporting
    pub fn analyze(&self, frames: &[Frame]) -> Result<AnalysisEnvelope, AnalysisError> {
        self.analyze_with_events(frames, &null_sender())
    }

    /// Analyze `frames`, reporting progress on `events`.
    ///
    /// Frame count is not re-checked here. If the budget runs out the
    /// extractors are abandoned and finish in the background on this
    /// request's own workers.
    pub fn analyze_with_events(
        &self,
        frames: &[Frame],
        events: &EventSender,
    ) -> Result<AnalysisEnvelope, AnalysisError> {
        let start = Instant::now();
        debug!(frames = frames.len(), "Dispatching extractors");
        events.send(Event::Analysis(AnalysisEvent::Started {
            frames: frames.len(),
        }));

        let pool = match self.request_pool() {
            Ok(pool) => pool,
            Err(e) => {
                error!(error = %e, "Could not start analysis workers");
                events.send(Event::Analysis(AnalysisEvent::Failed {
                    message: e.to_string(),
                }));
                return Err(e);
            }
        };

        let (tx, rx) = crossbeam_channel::bounded(1);
        let engine = Arc::clone(&self.engine);
        let shared: Arc<[Frame]> = frames.into();
        let job_events = events.clone();
        pool.spawn(move || {
            let signals = run_extractors(engine.as_ref(), &shared, &job_events);
            let _ = tx.send(signals);
        });

        let signals = match rx.recv_timeout(self.timeout) {
            Ok(Ok(signals)) => signals,
            Ok(Err(e)) => {
                error!(error = %e, "Extractor failed");
                events.send(Event::Analysis(AnalysisEvent::Failed {
                    message: e.to_string(),
                }));
                return Err(e.into());
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(budget = ?self.timeout, "Analysis timed out");
                events.send(Event::Analysis(AnalysisEvent::TimedOut));
                return Err(AnalysisError::Timeout {
                    budget: self.timeout,
                });
            }
            Err(RecvTimeoutError::Disconnected) => {
                error!("Analysis worker exited without a result");
                events.send(Event::Analysis(AnalysisEvent::Failed {
                    message: AnalysisError::WorkerLost.to_string(),
                }));
                return Err(AnalysisError::WorkerLost);
            }
        };

        let fusion = fuse(&FusionInputs {
            face_consistency: signals.face.face_consistency,
            temporal_consistency: signals.temporal.temporal_consistency,
            ai_artifact_score: signals.artifacts.ai_artifact_score,
            is_animal_content: signals.content.is_animal_content,
        });
        let recommendations =
            recommendation_messages(&fusion, signals.content.is_animal_content);

        let envelope = AnalysisEnvelope {
            fusion,
            analysis_details: AnalysisDetails {
                face_analysis: signals.face,
                frame_analysis: signals.temporal,
                artifact_analysis: signals.artifacts,
                is_animal_content: signals.content.is_animal_content,
                engine: self.engine.kind(),
            },
            recommendations,
            limitations: limitations(),
            total_processing_time: start.elapsed().as_secs_f64(),
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            probability = envelope.fusion.ai_probability,
            confidence = %envelope.fusion.confidence_level,
            duration_ms,
            "Analysis completed"
        );
        events.send(Event::Analysis(AnalysisEvent::Completed {
            probability: envelope.fusion.ai_probability,
            confidence: envelope.fusion.confidence_level,
            duration_ms,
        }));

        Ok(envelope)
    }

    /// Workers dedicated to one request. Dropping the handle lets the threads
    /// exit once any abandoned job finishes.
    fn request_pool(&self) -> Result<rayon::ThreadPool, AnalysisError> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("aitube-worker-{i}"))
            .panic_handler(|_| error!("Analysis worker panicked"))
            .build()
            .map_err(|e| AnalysisError::WorkerPool(e.to_string()))
    }

    /// Release engine resources. Safe to call more than once.
    pub fn cleanup(&self) {
        self.engine.cleanup();
        info!("Detector cleanup completed");
    }
}

/// Run the four extractors concurrently and join on all of them.
///
/// When several fail, the first in face, temporal, artifact, content order
/// is reported.
fn run_extractors(
    engine: &dyn DetectionEngine,
    frames: &[Frame],
    events: &EventSender,
) -> Result<Signals, ExtractionError> {
    let ((face, temporal), (artifacts, content)) = rayon::join(
        || {
            rayon::join(
                || timed(SignalKind::FaceConsistency, events, || engine.face_consistency(frames)),
                || {
                    timed(SignalKind::TemporalConsistency, events, || {
                        engine.temporal_consistency(frames)
                    })
                },
            )
        },
        || {
            rayon::join(
                || timed(SignalKind::Artifacts, events, || engine.artifacts(frames)),
                || timed(SignalKind::ContentType, events, || engine.content_type(frames)),
            )
        },
    );

    Ok(Signals {
        face: face?,
        temporal: temporal?,
        artifacts: artifacts?,
        content: content?,
    })
}

fn timed<T>(
    signal: SignalKind,
    events: &EventSender,
    extract: impl FnOnce() -> Result<T, ExtractionError>,
) -> Result<T, ExtractionError> {
    let start = Instant::now();
    let result = extract();
    let duration_ms = start.elapsed().as_millis() as u64;

    if result.is_ok() {
        debug!(%signal, duration_ms, "Extractor finished");
        events.send(Event::Analysis(AnalysisEvent::SignalCompleted {
            signal,
            duration_ms,
        }));
    }
    result
}
