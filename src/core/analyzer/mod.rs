//! # Analyzer Module
//!
//! Orchestrates one analysis request.
//!
//! ## Flow
//! 1. The four extractors run concurrently on a small worker pool
//! 2. All four are joined; the first extractor-fatal error aborts the request
//! 3. Fusion and recommendations run on the joined results
//! 4. The envelope is assembled with the fixed limitations and total time
//!
//! The caller waits at most the configured budget and receives a timeout
//! error instead of blocking indefinitely.

mod envelope;
mod executor;

pub use envelope::{AnalysisDetails, AnalysisEnvelope, LIMITATIONS};
pub use executor::{Analyzer, AnalyzerBuilder};
