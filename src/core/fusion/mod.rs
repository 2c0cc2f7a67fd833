//! # Fusion Module
//!
//! Combines the four signals into one probability that the frames were
//! synthetically generated.
//!
//! ## How It Works
//! 1. Each signal is mapped onto a 0-1 "suspicion" term
//! 2. Terms are combined with fixed weights that sum to 1.0
//! 3. The sum is clamped to 0-1; the decision uses a strict `> 0.6`
//! 4. A confidence tier is bucketed independently at 0.3 / 0.7
//!
//! ## Term Directions
//! - face: `1 - face_consistency` (inconsistent faces are suspicious)
//! - temporal: `temporal_consistency` used as-is. Unlike the face term this is
//!   not inverted, so steadier sequences push the probability up. The
//!   asymmetry is kept deliberately; see DESIGN.md.
//! - artifacts: `ai_artifact_score` used as-is
//! - animal: 0 when animal content is detected, otherwise 1

use serde::{Deserialize, Serialize};

/// Probability strictly above which frames are called AI-generated
pub const DECISION_THRESHOLD: f64 = 0.6;

/// Probabilities below this are low confidence
pub const LOW_CONFIDENCE_CEILING: f64 = 0.3;

/// Probabilities at or above this are high confidence
pub const HIGH_CONFIDENCE_FLOOR: f64 = 0.7;

/// Weight of each fusion term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionWeights {
    pub face_consistency: f64,
    pub temporal_consistency: f64,
    pub ai_artifacts: f64,
    pub animal_penalty: f64,
}

/// The fixed production weights
pub const WEIGHTS: FusionWeights = FusionWeights {
    face_consistency: 0.25,
    temporal_consistency: 0.30,
    ai_artifacts: 0.35,
    animal_penalty: 0.10,
};

impl FusionWeights {
    pub fn total(&self) -> f64 {
        self.face_consistency + self.temporal_consistency + self.ai_artifacts + self.animal_penalty
    }
}

/// Coarse confidence bucket, independent of the binary decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    /// probability < 0.3
    Low,
    /// 0.3 <= probability < 0.7
    Medium,
    /// probability >= 0.7
    High,
}

impl ConfidenceLevel {
    /// Bucket a probability; lower bounds are inclusive
    pub fn from_probability(probability: f64) -> Self {
        if probability < LOW_CONFIDENCE_CEILING {
            ConfidenceLevel::Low
        } else if probability < HIGH_CONFIDENCE_FLOOR {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::High
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceLevel::Low => write!(f, "low"),
            ConfidenceLevel::Medium => write!(f, "medium"),
            ConfidenceLevel::High => write!(f, "high"),
        }
    }
}

/// The primary value of each signal, as consumed by fusion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionInputs {
    pub face_consistency: f64,
    pub temporal_consistency: f64,
    pub ai_artifact_score: f64,
    pub is_animal_content: bool,
}

/// Outcome of fusing the signals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionResult {
    /// Probability rounded to 3 decimal places
    pub ai_probability: f64,
    /// `probability > 0.6`, decided on the unrounded value
    pub is_ai_generated: bool,
    /// Bucketed on the unrounded value
    pub confidence_level: ConfidenceLevel,
    /// Unrounded clamped probability
    #[serde(skip)]
    pub raw_probability: f64,
}

/// Weighted sum of the transformed signal terms, clamped to 0-1.
///
/// A NaN input cannot produce an ordered probability and is treated as 0.
pub fn weighted_probability(inputs: &FusionInputs, weights: &FusionWeights) -> f64 {
    let face_term = 1.0 - inputs.face_consistency;
    let temporal_term = inputs.temporal_consistency;
    let artifact_term = inputs.ai_artifact_score;
    let animal_term = if inputs.is_animal_content { 0.0 } else { 1.0 };

    let probability = face_term * weights.face_consistency
        + temporal_term * weights.temporal_consistency
        + artifact_term * weights.ai_artifacts
        + animal_term * weights.animal_penalty;

    if probability.is_nan() {
        return 0.0;
    }
    probability.clamp(0.0, 1.0)
}

/// Decide on a probability that has already been computed
pub fn decide(probability: f64) -> FusionResult {
    FusionResult {
        ai_probability: round_to_thousandths(probability),
        is_ai_generated: probability > DECISION_THRESHOLD,
        confidence_level: ConfidenceLevel::from_probability(probability),
        raw_probability: probability,
    }
}

/// Fuse the signals with the production weights
pub fn fuse(inputs: &FusionInputs) -> FusionResult {
    decide(weighted_probability(inputs, &WEIGHTS))
}

fn round_to_thousandths(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
