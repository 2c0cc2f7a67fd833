//! # Engine Module
//!
//! The capability seam between a deterministic mock and the real extractor
//! pipeline. An engine is chosen once, when the process is configured, and
//! then shared by reference with every analysis.

mod heuristic;
mod mock;
mod traits;

pub use heuristic::HeuristicEngine;
pub use mock::MockEngine;
pub use traits::{DetectionEngine, EngineKind};

use crate::core::config::AnalysisConfig;
use crate::error::EngineError;
use std::sync::Arc;

/// Build the engine selected by the configuration
pub fn create_engine(config: &AnalysisConfig) -> Result<Arc<dyn DetectionEngine>, EngineError> {
    match config.engine {
        EngineKind::Mock => Ok(Arc::new(MockEngine::new())),
        EngineKind::Heuristic => {
            let path = config.face_model.as_deref().ok_or(EngineError::ModelMissing)?;
            Ok(Arc::new(HeuristicEngine::from_model(path)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_config_builds_mock() {
        let engine = create_engine(&AnalysisConfig::default()).unwrap();
        assert_eq!(engine.kind(), EngineKind::Mock);
    }

    #[test]
    fn heuristic_without_model_fails() {
        let config = AnalysisConfig::new().engine(EngineKind::Heuristic);
        assert!(matches!(
            create_engine(&config),
            Err(EngineError::ModelMissing)
        ));
    }

    #[test]
    fn heuristic_with_missing_model_fails() {
        let config = AnalysisConfig::new()
            .engine(EngineKind::Heuristic)
            .face_model(PathBuf::from("/nonexistent/seeta.bin"));
        assert!(matches!(
            create_engine(&config),
            Err(EngineError::ModelNotFound { .. })
        ));
    }
}
