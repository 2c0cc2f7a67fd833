//! Event type definitions for progress reporting.

use crate::core::fusion::ConfidenceLevel;
use crate::core::signals::SignalKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the detector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// File loading and decoding
    Ingest(IngestEvent),
    /// Signal extraction and fusion
    Analysis(AnalysisEvent),
}

/// Events while turning files into frames
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IngestEvent {
    /// Loading has started
    Started { files: usize },
    /// A file was decoded
    FrameLoaded {
        index: usize,
        path: PathBuf,
        width: u32,
        height: u32,
    },
    /// All files decoded
    Completed { frames: usize },
}

/// Events during one analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AnalysisEvent {
    /// Extractors have been dispatched
    Started { frames: usize },
    /// One extractor finished
    SignalCompleted { signal: SignalKind, duration_ms: u64 },
    /// Fusion finished and an envelope is available
    Completed {
        probability: f64,
        confidence: ConfidenceLevel,
        duration_ms: u64,
    },
    /// An extractor failed; no envelope is produced
    Failed { message: String },
    /// The time budget ran out
    TimedOut,
}
