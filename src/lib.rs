//! # AITube Detector
//!
//! Estimates whether a short sequence of still frames was synthetically
//! generated.
//!
//! ## Core Philosophy
//! - **Explain the verdict** - every signal behind the probability is returned
//! - **Fail whole** - an extractor that cannot run aborts the request; no partial results
//! - **Stateless** - nothing is cached or shared between requests
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and presentation layers:
//! - `core` - Frames, vision primitives, signal extractors, fusion and orchestration
//! - `events` - Event-driven progress reporting
//! - `error` - Error taxonomy
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use crate::core::{AnalysisConfig, AnalysisEnvelope, Analyzer, Frame};
pub use error::{DetectorError, Result};

/// Initialize tracing for the application.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (e.g. `"info"`) is used.
/// Calling this twice is harmless.
pub fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
