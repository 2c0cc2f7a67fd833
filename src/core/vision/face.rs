//! Face detection seam.
//!
//! Extractors only see the [`FaceDetector`] trait. The production
//! implementation wraps a SeetaFace cascade loaded through `rustface`; tests
//! plug in detectors that return fixed face sets.

use crate::core::frame::{FaceBox, FaceSet};
use crate::error::{EngineError, FaceDetectionError};
use image::GrayImage;
use rustface::ImageData;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;

/// Pluggable face detection backend.
pub trait FaceDetector: Send + Sync {
    /// Detect faces in a grayscale buffer.
    fn detect(&self, gray: &GrayImage) -> Result<FaceSet, FaceDetectionError>;

    /// Release any loaded model. Must be safe to call more than once.
    fn release(&self) {}

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// SeetaFace frontal face cascade
pub struct SeetaFaceDetector {
    model_path: PathBuf,
    /// Raw model bytes; `None` once released
    model: Mutex<Option<Arc<Vec<u8>>>>,
}

impl SeetaFaceDetector {
    /// Smallest face side, in pixels, the cascade looks for
    pub const MIN_FACE_SIZE: u32 = 30;
    const SCORE_THRESHOLD: f64 = 2.0;
    const PYRAMID_SCALE_FACTOR: f32 = 0.8;
    const WINDOW_STEP: u32 = 4;

    /// Load and validate a model file. Fails fast if the file is missing or
    /// does not parse.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        if !path.is_file() {
            return Err(EngineError::ModelNotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = fs::read(path).map_err(|e| EngineError::ModelLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        rustface::read_model(Cursor::new(bytes.as_slice())).map_err(|e| {
            EngineError::ModelLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        info!(path = %path.display(), bytes = bytes.len(), "Loaded face model");

        Ok(Self {
            model_path: path.to_path_buf(),
            model: Mutex::new(Some(Arc::new(bytes))),
        })
    }

    fn model_bytes(&self) -> Result<Arc<Vec<u8>>, FaceDetectionError> {
        let guard = self
            .model
            .lock()
            .map_err(|_| FaceDetectionError::Unavailable)?;
        guard.clone().ok_or(FaceDetectionError::Unavailable)
    }
}

impl FaceDetector for SeetaFaceDetector {
    fn detect(&self, gray: &GrayImage) -> Result<FaceSet, FaceDetectionError> {
        if gray.width() < Self::MIN_FACE_SIZE || gray.height() < Self::MIN_FACE_SIZE {
            return Ok(Vec::new());
        }

        let bytes = self.model_bytes()?;

        // The cascade keeps per-scan state, so each call gets its own detector
        let model = rustface::read_model(Cursor::new(bytes.as_slice()))
            .map_err(|e| FaceDetectionError::Failed(e.to_string()))?;
        let mut detector = rustface::create_detector_with_model(model);
        detector.set_min_face_size(Self::MIN_FACE_SIZE);
        detector.set_score_thresh(Self::SCORE_THRESHOLD);
        detector.set_pyramid_scale_factor(Self::PYRAMID_SCALE_FACTOR);
        detector.set_slide_window_step(Self::WINDOW_STEP, Self::WINDOW_STEP);

        let mut image = ImageData::new(gray.as_raw(), gray.width(), gray.height());

        Ok(detector
            .detect(&mut image)
            .into_iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceBox {
                    x: bbox.x(),
                    y: bbox.y(),
                    width: bbox.width(),
                    height: bbox.height(),
                }
            })
            .collect())
    }

    fn release(&self) {
        if let Ok(mut guard) = self.model.lock() {
            if guard.take().is_some() {
                info!(path = %self.model_path.display(), "Released face model");
            }
        }
    }

    fn name(&self) -> &'static str {
        "seetaface"
    }
}
