//! Upload limits.

use crate::error::IngestError;
use serde::Serialize;
use std::path::Path;

/// Accepted upload shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestLimits {
    pub min_frames: usize,
    pub max_frames: usize,
    /// Bytes
    pub max_file_size: u64,
    /// Lowercase, without the dot
    pub allowed_extensions: Vec<String>,
}

impl Default for IngestLimits {
    fn default() -> Self {
        Self {
            min_frames: 1,
            max_frames: 5,
            max_file_size: 10 * 1024 * 1024,
            allowed_extensions: ["jpg", "jpeg", "png", "bmp"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl IngestLimits {
    /// Check whether a path has an accepted extension (case-insensitive)
    pub fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .is_some_and(|ext| self.allowed_extensions.iter().any(|a| *a == ext))
    }
}

/// Reject uploads with too few or too many files
pub fn validate_count(count: usize, limits: &IngestLimits) -> Result<(), IngestError> {
    if count < limits.min_frames {
        return Err(IngestError::TooFewFrames {
            min: limits.min_frames,
        });
    }
    if count > limits.max_frames {
        return Err(IngestError::TooManyFrames {
            count,
            max: limits.max_frames,
        });
    }
    Ok(())
}

/// Reject a single file by extension or size
pub fn validate_file(path: &Path, size: u64, limits: &IngestLimits) -> Result<(), IngestError> {
    if !limits.accepts_extension(path) {
        return Err(IngestError::UnsupportedType {
            path: path.to_path_buf(),
        });
    }
    if size > limits.max_file_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max: limits.max_file_size,
        });
    }
    Ok(())
}
