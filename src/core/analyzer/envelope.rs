//! The result returned across the library boundary.

use crate::core::engine::EngineKind;
use crate::core::fusion::{ConfidenceLevel, FusionResult};
use crate::core::signals::{ArtifactAnalysis, FaceAnalysis, TemporalAnalysis};
use serde::{Deserialize, Serialize};

/// Caveats reported with every analysis, in this order
pub const LIMITATIONS: [&str; 4] = [
    "Speed prioritized over accuracy for MVP",
    "Limited AI model training data",
    "May miss sophisticated deepfakes",
    "Animal content detection is heuristic-based",
];

/// The four signal results, kept for transparency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDetails {
    pub face_analysis: FaceAnalysis,
    pub frame_analysis: TemporalAnalysis,
    pub artifact_analysis: ArtifactAnalysis,
    pub is_animal_content: bool,
    /// Engine that produced the signals
    pub engine: EngineKind,
}

/// Complete outcome of one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEnvelope {
    #[serde(flatten)]
    pub fusion: FusionResult,
    pub analysis_details: AnalysisDetails,
    pub recommendations: Vec<String>,
    pub limitations: Vec<String>,
    /// Wall-clock seconds from dispatch to assembly
    pub total_processing_time: f64,
}

impl AnalysisEnvelope {
    /// Probability rounded to three decimals
    pub fn ai_probability(&self) -> f64 {
        self.fusion.ai_probability
    }

    pub fn is_ai_generated(&self) -> bool {
        self.fusion.is_ai_generated
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        self.fusion.confidence_level
    }

    /// A copy with every timing field zeroed, for comparing two runs
    pub fn without_timings(&self) -> Self {
        let mut copy = self.clone();
        copy.analysis_details.face_analysis.analysis_time = 0.0;
        copy.analysis_details.frame_analysis.analysis_time = 0.0;
        copy.analysis_details.artifact_analysis.analysis_time = 0.0;
        copy.total_processing_time = 0.0;
        copy
    }
}

pub(crate) fn limitations() -> Vec<String> {
    LIMITATIONS.iter().map(|l| l.to_string()).collect()
}
