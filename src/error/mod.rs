//! # Error Module
//!
//! Error types for the frame authenticity detector.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, frame indices, limits
//! - **Recoverable errors stay local** - a frame whose face detection fails
//!   counts as zero faces; only extractor-fatal errors reach the caller

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Input error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Errors raised by a signal extractor that has no local fallback.
///
/// Any of these aborts the whole analysis; no partial envelope is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("No frames were supplied to the {extractor} extractor")]
    NoFrames { extractor: &'static str },

    #[error("Frame {index} has zero width or height")]
    EmptyFrame { index: usize },

    #[error("Vision primitive '{primitive}' failed: {reason}")]
    Primitive {
        primitive: &'static str,
        reason: String,
    },
}

/// Per-frame face detection failure. Always recovered by the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FaceDetectionError {
    #[error("Face detector is unavailable (released or poisoned)")]
    Unavailable,

    #[error("Face detection failed: {0}")]
    Failed(String),
}

/// Errors raised while constructing an engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Face model not found: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("Failed to load face model {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    #[error("The heuristic engine needs a face model path (set --face-model or FACE_MODEL_PATH)")]
    ModelMissing,
}

/// Errors raised while turning files into frames.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Please provide at least {min} image file(s)")]
    TooFewFrames { min: usize },

    #[error("Too many image files: {count} (max {max})")]
    TooManyFrames { count: usize, max: usize },

    #[error("File {path} is too large: {size} bytes (max {max} bytes)")]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("File {path} is not a supported image type")]
    UnsupportedType { path: PathBuf },

    #[error("Invalid image file {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the analysis orchestrator.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Analysis did not finish within {budget:?}")]
    Timeout { budget: Duration },

    #[error("Analysis worker stopped before returning a result")]
    WorkerLost,

    #[error("Failed to start analysis workers: {0}")]
    WorkerPool(String),
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, DetectorError>;
