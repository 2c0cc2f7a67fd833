//! Sharpness, noise and contrast measurements on grayscale buffers.
//!
//! Uses Laplacian variance for blur/sharpness detection.

use image::GrayImage;
use serde::{Deserialize, Serialize};

/// Mean and population standard deviation of pixel intensity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityStats {
    /// Average intensity (0-255)
    pub mean: f64,
    /// Population standard deviation (0-127.5)
    pub std_dev: f64,
}

/// Image quality diagnostics reported by `inspect`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Laplacian variance (higher = sharper)
    /// Typical range: 0-10000+ (very blurry to very sharp)
    pub blur_variance: f64,

    /// Intensity standard deviation, used as a noise estimate
    pub noise: f64,

    /// Standard deviation divided by mean intensity (0 for an all-black frame)
    pub contrast: f64,
}

impl QualityMetrics {
    /// Measure a grayscale buffer
    pub fn measure(gray: &GrayImage) -> Self {
        let stats = intensity_stats(gray);
        let contrast = if stats.mean > 0.0 {
            stats.std_dev / stats.mean
        } else {
            0.0
        };

        Self {
            blur_variance: laplacian_variance(gray),
            noise: stats.std_dev,
            contrast,
        }
    }
}

/// Compute Laplacian variance as a measure of sharpness
///
/// The Laplacian operator detects edges. Sharp images have more defined edges,
/// resulting in higher variance in the Laplacian output. Every pixel is
/// convolved, with borders mirrored without repeating the edge pixel
/// (`dcb|abcd|cba`). An empty buffer yields 0.
pub fn laplacian_variance(gray: &GrayImage) -> f64 {
    let (width, height) = gray.dimensions();

    if width == 0 || height == 0 {
        return 0.0;
    }

    let at = |x: i64, y: i64| -> f64 {
        let x = reflect_101(x, width);
        let y = reflect_101(y, height);
        gray.get_pixel(x, y)[0] as f64
    };

    // Laplacian kernel: [0, 1, 0; 1, -4, 1; 0, 1, 0]
    let mut responses: Vec<f64> = Vec::with_capacity(width as usize * height as usize);

    for y in 0..height as i64 {
        for x in 0..width as i64 {
            responses.push(
                at(x, y - 1) + at(x, y + 1) + at(x - 1, y) + at(x + 1, y) - 4.0 * at(x, y),
            );
        }
    }

    let n = responses.len() as f64;
    let mean = responses.iter().sum::<f64>() / n;
    responses.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / n
}

/// Map an index one step outside `0..len` back inside by mirroring
fn reflect_101(i: i64, len: u32) -> u32 {
    let last = len as i64 - 1;
    if last == 0 {
        return 0;
    }
    let mirrored = if i < 0 {
        -i
    } else if i > last {
        2 * last - i
    } else {
        i
    };
    mirrored as u32
}

/// Compute mean and standard deviation of a grayscale buffer
pub fn intensity_stats(gray: &GrayImage) -> IntensityStats {
    let raw = gray.as_raw();

    if raw.is_empty() {
        return IntensityStats {
            mean: 0.0,
            std_dev: 0.0,
        };
    }

    let n = raw.len() as f64;
    let mean = raw.iter().map(|&v| v as f64).sum::<f64>() / n;
    let variance = raw
        .iter()
        .map(|&v| (v as f64 - mean).powi(2))
        .sum::<f64>()
        / n;

    IntensityStats {
        mean,
        std_dev: variance.sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma};

    fn create_uniform_image(value: u8, size: u32) -> GrayImage {
        ImageBuffer::from_fn(size, size, |_, _| Luma([value]))
    }

    fn create_checkerboard_image(size: u32) -> GrayImage {
        ImageBuffer::from_fn(size, size, |x, y| {
            if (x + y) % 2 == 0 {
                Luma([0])
            } else {
                Luma([255])
            }
        })
    }

    #[test]
    fn uniform_image_has_zero_laplacian_variance() {
        assert_eq!(laplacian_variance(&create_uniform_image(128, 32)), 0.0);
    }

    #[test]
    fn checkerboard_has_high_laplacian_variance() {
        let variance = laplacian_variance(&create_checkerboard_image(32));
        assert!(
            variance > 1000.0,
            "Checkerboard should be very sharp, got {}",
            variance
        );
    }

    #[test]
    fn tiny_uniform_image_has_zero_variance() {
        assert_eq!(laplacian_variance(&create_uniform_image(9, 2)), 0.0);
        assert_eq!(laplacian_variance(&create_uniform_image(9, 1)), 0.0);
        assert_eq!(laplacian_variance(&GrayImage::new(0, 0)), 0.0);
    }

    #[test]
    fn border_pixels_are_convolved_with_mirrored_neighbors() {
        // Lone bright centre. Responses: centre -36, its four neighbors 18
        // each (the mirror doubles the centre), corners 0. Mean 4, so the
        // variance is (1600 + 4 * 196 + 4 * 16) / 9 = 272.
        let mut image = create_uniform_image(0, 3);
        image.put_pixel(1, 1, Luma([9]));

        assert_eq!(laplacian_variance(&image), 272.0);
    }

    #[test]
    fn small_images_still_register_edges() {
        let image: GrayImage =
            ImageBuffer::from_fn(2, 2, |x, _| if x == 0 { Luma([0]) } else { Luma([100]) });
        assert!(laplacian_variance(&image) > 0.0);
    }

    #[test]
    fn intensity_stats_of_two_levels() {
        // Half 0, half 200: mean 100, stddev 100
        let image: GrayImage =
            ImageBuffer::from_fn(10, 10, |x, _| if x < 5 { Luma([0]) } else { Luma([200]) });
        let stats = intensity_stats(&image);
        assert!((stats.mean - 100.0).abs() < 1e-9);
        assert!((stats.std_dev - 100.0).abs() < 1e-9);
    }

    #[test]
    fn black_frame_has_zero_contrast() {
        let metrics = QualityMetrics::measure(&create_uniform_image(0, 16));
        assert_eq!(metrics.contrast, 0.0);
        assert_eq!(metrics.noise, 0.0);
    }

    #[test]
    fn contrast_is_stddev_over_mean() {
        let image: GrayImage =
            ImageBuffer::from_fn(10, 10, |x, _| if x < 5 { Luma([50]) } else { Luma([150]) });
        let metrics = QualityMetrics::measure(&image);
        assert!((metrics.contrast - 0.5).abs() < 1e-9);
    }
}
