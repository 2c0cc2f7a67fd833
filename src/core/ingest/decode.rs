//! Image decoding into RGB frames.
//!
//! JPEG goes through zune-jpeg first; everything else, and any JPEG zune
//! refuses, goes through the image crate.

use crate::core::frame::Frame;
use crate::error::IngestError;
use image::{DynamicImage, ImageBuffer, Luma, Rgb, Rgba};
use std::path::Path;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Decode an in-memory image. `origin` names the source in errors.
pub fn decode_bytes(bytes: &[u8], origin: &Path) -> Result<Frame, IngestError> {
    let image = if bytes.starts_with(&JPEG_MAGIC) {
        decode_jpeg(bytes, origin).or_else(|_| decode_fallback(bytes, origin))?
    } else {
        decode_fallback(bytes, origin)?
    };

    let frame = Frame::from_dynamic(image);
    if frame.is_empty() {
        return Err(decode_error(origin, "image has zero width or height"));
    }
    Ok(frame)
}

fn decode_jpeg(bytes: &[u8], origin: &Path) -> Result<DynamicImage, IngestError> {
    let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::RGB);
    let mut decoder = JpegDecoder::new_with_options(bytes, options);

    let pixels = decoder
        .decode()
        .map_err(|e| decode_error(origin, format!("zune-jpeg decode failed: {e:?}")))?;

    let info = decoder
        .info()
        .ok_or_else(|| decode_error(origin, "missing JPEG header info"))?;
    let width = info.width as u32;
    let height = info.height as u32;

    let buffer_error = || decode_error(origin, "decoded buffer does not match dimensions");

    match decoder.get_output_colorspace().unwrap_or(ColorSpace::RGB) {
        ColorSpace::RGB => ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, pixels)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(buffer_error),
        ColorSpace::RGBA => ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, pixels)
            .map(DynamicImage::ImageRgba8)
            .ok_or_else(buffer_error),
        ColorSpace::Luma => ImageBuffer::<Luma<u8>, _>::from_raw(width, height, pixels)
            .map(DynamicImage::ImageLuma8)
            .ok_or_else(buffer_error),
        other => Err(decode_error(
            origin,
            format!("unsupported JPEG colorspace {other:?}"),
        )),
    }
}

fn decode_fallback(bytes: &[u8], origin: &Path) -> Result<DynamicImage, IngestError> {
    image::load_from_memory(bytes).map_err(|e| decode_error(origin, e.to_string()))
}

fn decode_error(origin: &Path, reason: impl Into<String>) -> IngestError {
    IngestError::Decode {
        path: origin.to_path_buf(),
        reason: reason.into(),
    }
}
