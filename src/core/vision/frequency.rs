//! 2-D frequency-domain analysis.
//!
//! A separable FFT (rows, then columns) over the grayscale buffer. Strong
//! isolated peaks in the magnitude spectrum indicate periodic, tiled
//! structure.

use crate::error::ExtractionError;
use image::GrayImage;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Percentile of the magnitude spectrum above which a bin counts as a peak
pub const PEAK_PERCENTILE: f64 = 95.0;

/// Magnitude spectrum of a grayscale buffer, row-major, unshifted.
pub fn magnitude_spectrum(gray: &GrayImage) -> Result<Vec<f64>, ExtractionError> {
    let (width, height) = (gray.width() as usize, gray.height() as usize);
    if width == 0 || height == 0 {
        return Err(ExtractionError::Primitive {
            primitive: "fft2",
            reason: "Cannot transform an empty buffer".to_string(),
        });
    }

    let mut data: Vec<Complex<f64>> = gray
        .as_raw()
        .iter()
        .map(|&v| Complex::new(v as f64, 0.0))
        .collect();

    let mut planner = FftPlanner::<f64>::new();

    let row_fft = planner.plan_fft_forward(width);
    for row in data.chunks_exact_mut(width) {
        row_fft.process(row);
    }

    let col_fft = planner.plan_fft_forward(height);
    let mut column = vec![Complex::new(0.0, 0.0); height];
    for x in 0..width {
        for (y, slot) in column.iter_mut().enumerate() {
            *slot = data[y * width + x];
        }
        col_fft.process(&mut column);
        for (y, value) in column.iter().enumerate() {
            data[y * width + x] = *value;
        }
    }

    Ok(data.iter().map(|c| c.norm()).collect())
}

/// Fraction of spectrum bins strictly above the 95th percentile magnitude.
pub fn repetitive_pattern_score(gray: &GrayImage) -> Result<f64, ExtractionError> {
    let magnitudes = magnitude_spectrum(gray)?;
    let threshold = percentile(&magnitudes, PEAK_PERCENTILE);
    let peaks = magnitudes.iter().filter(|&&m| m > threshold).count();

    Ok(peaks as f64 / magnitudes.len() as f64)
}

/// Linear-interpolated percentile (0-100) of a non-empty slice
fn percentile(values: &[f64], pct: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = (pct / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}
