//! # Signals Module
//!
//! Four independent extractors, each turning the frame sequence into one
//! piece of evidence:
//! - `face` - stability of the per-frame face count
//! - `temporal` - pixel difference between adjacent frames
//! - `artifacts` - blur, edge density and texture uniformity per frame
//! - `content` - animal-versus-human subject heuristic
//!
//! Extractors share no state and may run in any order or in parallel.

pub mod artifacts;
pub mod content;
pub mod face;
pub mod temporal;
mod types;

pub use artifacts::analyze_artifacts;
pub use content::analyze_content_type;
pub use face::analyze_face_consistency;
pub use temporal::analyze_temporal_consistency;
pub use types::{
    ArtifactAnalysis, ArtifactBreakdown, ContentAnalysis, FaceAnalysis, SignalKind,
    TemporalAnalysis,
};
