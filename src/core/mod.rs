//! # Core Module
//!
//! The UI-agnostic detection engine.
//!
//! ## Modules
//! - `frame` - Decoded RGB frames and face boxes
//! - `vision` - Low-level image primitives (blur, edges, resize, FFT, LBP, faces)
//! - `signals` - The four evidence extractors
//! - `fusion` - Weighted combination into a probability and decision
//! - `recommend` - User-facing advisories
//! - `engine` - Mock and heuristic engine variants
//! - `analyzer` - Orchestrates one request end to end
//! - `ingest` - Validates and decodes image files
//! - `config` - Process-level settings

pub mod analyzer;
pub mod config;
pub mod engine;
pub mod frame;
pub mod fusion;
pub mod ingest;
pub mod recommend;
pub mod signals;
pub mod vision;

// Re-export commonly used types
pub use analyzer::{AnalysisEnvelope, Analyzer, AnalyzerBuilder};
pub use config::AnalysisConfig;
pub use engine::{create_engine, DetectionEngine, EngineKind};
pub use frame::{FaceBox, Frame};
pub use fusion::{ConfidenceLevel, FusionResult};
pub use ingest::{load_frames, IngestLimits};
pub use vision::{inspect_frame, FrameInspection};
