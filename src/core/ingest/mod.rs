//! # Ingest Module
//!
//! Turns a list of image files into decoded frames, enforcing the upload
//! limits (file count, size and extension) before any pixel work starts.
//!
//! Files are processed in order and the first failure aborts the load.

mod decode;
mod validate;

pub use decode::decode_bytes;
pub use validate::{validate_count, validate_file, IngestLimits};

use crate::core::frame::Frame;
use crate::error::IngestError;
use crate::events::{Event, EventSender, IngestEvent};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load and decode `paths` in order
pub fn load_frames(paths: &[PathBuf], limits: &IngestLimits) -> Result<Vec<Frame>, IngestError> {
    load_frames_with_events(paths, limits, &crate::events::null_sender())
}

/// Like [`load_frames`], reporting each decoded file on `events`
pub fn load_frames_with_events(
    paths: &[PathBuf],
    limits: &IngestLimits,
    events: &EventSender,
) -> Result<Vec<Frame>, IngestError> {
    validate_count(paths.len(), limits)?;
    events.send(Event::Ingest(IngestEvent::Started { files: paths.len() }));

    let mut frames = Vec::with_capacity(paths.len());
    for (index, path) in paths.iter().enumerate() {
        let frame = load_frame(path, limits)?;
        debug!(path = %path.display(), width = frame.width(), height = frame.height(), "Decoded frame");
        events.send(Event::Ingest(IngestEvent::FrameLoaded {
            index,
            path: path.clone(),
            width: frame.width(),
            height: frame.height(),
        }));
        frames.push(frame);
    }

    events.send(Event::Ingest(IngestEvent::Completed {
        frames: frames.len(),
    }));
    Ok(frames)
}

fn load_frame(path: &Path, limits: &IngestLimits) -> Result<Frame, IngestError> {
    let io_error = |source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = fs::metadata(path).map_err(io_error)?.len();
    validate_file(path, size, limits)?;

    let bytes = fs::read(path).map_err(io_error)?;
    decode_bytes(&bytes, path)
}
