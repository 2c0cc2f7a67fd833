//! # Config Module
//!
//! Process-level settings for the detector: which engine to build, where its
//! face model lives, how long an analysis may take and which uploads are
//! accepted. Fusion weights and decision thresholds are fixed constants and
//! only reported here.

use crate::core::engine::EngineKind;
use crate::core::fusion::{
    FusionWeights, DECISION_THRESHOLD, HIGH_CONFIDENCE_FLOOR, LOW_CONFIDENCE_CEILING, WEIGHTS,
};
use crate::core::ingest::IngestLimits;
use crate::core::recommend::REVIEW_FLOOR;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default per-analysis time budget
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Default size of the analysis worker pool
pub const DEFAULT_WORKERS: usize = 2;

/// Configuration for an analysis session
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Engine to construct
    pub engine: EngineKind,
    /// SeetaFace model file, required by the heuristic engine
    pub face_model: Option<PathBuf>,
    /// Wall-clock budget for one analysis
    pub timeout: Duration,
    /// Number of analysis worker threads
    pub workers: usize,
    /// Upload limits applied by the ingest layer
    pub limits: IngestLimits,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::Mock,
            face_model: None,
            timeout: DEFAULT_TIMEOUT,
            workers: DEFAULT_WORKERS,
            limits: IngestLimits::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the engine
    pub fn engine(mut self, engine: EngineKind) -> Self {
        self.engine = engine;
        self
    }

    /// Set the face model path
    pub fn face_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.face_model = Some(path.into());
        self
    }

    /// Set the analysis time budget
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the time budget from fractional seconds. Non-finite or
    /// non-positive values keep the current budget.
    pub fn timeout_secs(mut self, secs: f64) -> Self {
        if secs.is_finite() && secs > 0.0 {
            self.timeout = Duration::from_secs_f64(secs);
        }
        self
    }

    /// Set the worker count (at least 1)
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Replace the ingest limits
    pub fn limits(mut self, limits: IngestLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Report of the effective configuration, including the fixed constants
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            engine: self.engine,
            face_model: self.face_model.clone(),
            timeout_secs: self.timeout.as_secs_f64(),
            workers: self.workers,
            max_frames: self.limits.max_frames,
            min_frames: self.limits.min_frames,
            max_file_size: self.limits.max_file_size,
            allowed_extensions: self.limits.allowed_extensions.clone(),
            decision_threshold: DECISION_THRESHOLD,
            low_confidence_ceiling: LOW_CONFIDENCE_CEILING,
            high_confidence_floor: HIGH_CONFIDENCE_FLOOR,
            review_floor: REVIEW_FLOOR,
            weights: WEIGHTS,
        }
    }

    pub fn face_model_path(&self) -> Option<&Path> {
        self.face_model.as_deref()
    }
}

/// Serializable view of an [`AnalysisConfig`]
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub engine: EngineKind,
    pub face_model: Option<PathBuf>,
    pub timeout_secs: f64,
    pub workers: usize,
    pub min_frames: usize,
    pub max_frames: usize,
    pub max_file_size: u64,
    pub allowed_extensions: Vec<String>,
    pub decision_threshold: f64,
    pub low_confidence_ceiling: f64,
    pub high_confidence_floor: f64,
    pub review_floor: f64,
    pub weights: FusionWeights,
}
