//! Local binary pattern texture descriptor.

use image::GrayImage;

/// Number of distinct 8-neighbour LBP codes
pub const LBP_BINS: usize = 256;

/// Neighbour offsets (dy, dx), one per code bit, starting at the left
/// neighbour and walking clockwise.
const NEIGHBOURS: [(i64, i64); 8] = [
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
];

/// 256-bin histogram of 8-neighbour local binary pattern codes.
///
/// A bit is set when the neighbour is at least as bright as the centre. Only
/// interior pixels get a code; border pixels are counted as code 0, so the
/// histogram always sums to the pixel count.
pub fn lbp_histogram(gray: &GrayImage) -> Vec<u32> {
    let mut histogram = vec![0u32; LBP_BINS];
    let (width, height) = gray.dimensions();
    let total = width as u64 * height as u64;

    if width < 3 || height < 3 {
        histogram[0] = total as u32;
        return histogram;
    }

    let interior = (width as u64 - 2) * (height as u64 - 2);
    histogram[0] = (total - interior) as u32;

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let center = gray.get_pixel(x, y)[0];
            let mut code = 0usize;
            for (bit, (dy, dx)) in NEIGHBOURS.iter().enumerate() {
                let ny = (y as i64 + dy) as u32;
                let nx = (x as i64 + dx) as u32;
                if gray.get_pixel(nx, ny)[0] >= center {
                    code |= 1 << bit;
                }
            }
            histogram[code] += 1;
        }
    }

    histogram
}
