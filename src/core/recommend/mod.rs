//! # Recommendation Module
//!
//! Turns a fusion result into short, ordered advisories for the user.
//! The decision message always comes first and the animal caveat, when
//! present, always comes last.

use crate::core::fusion::FusionResult;
use serde::{Deserialize, Serialize};

/// Rounded probability above which an authentic verdict still suggests review
pub const REVIEW_FLOOR: f64 = 0.4;

/// A single advisory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    VerifyAuthenticity,
    AppearsAuthentic,
    ManualReview,
    AnimalContentCaveat,
}

impl Recommendation {
    /// Text shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::VerifyAuthenticity => {
                "Content likely AI-generated - verify authenticity"
            }
            Recommendation::AppearsAuthentic => "Content appears to be authentic",
            Recommendation::ManualReview => {
                "Some AI-like characteristics detected - consider manual review"
            }
            Recommendation::AnimalContentCaveat => {
                "Animal content detected - AI detection less reliable"
            }
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Ordered advisories for a fusion outcome
pub fn recommend(fusion: &FusionResult, is_animal_content: bool) -> Vec<Recommendation> {
    let mut recommendations = Vec::with_capacity(3);

    if fusion.is_ai_generated {
        recommendations.push(Recommendation::VerifyAuthenticity);
    } else {
        recommendations.push(Recommendation::AppearsAuthentic);
        if fusion.ai_probability > REVIEW_FLOOR {
            recommendations.push(Recommendation::ManualReview);
        }
    }

    if is_animal_content {
        recommendations.push(Recommendation::AnimalContentCaveat);
    }

    recommendations
}

/// Advisory texts, in order
pub fn recommendation_messages(fusion: &FusionResult, is_animal_content: bool) -> Vec<String> {
    recommend(fusion, is_animal_content)
        .iter()
        .map(|r| r.message().to_string())
        .collect()
}
