//! # aitube CLI
//!
//! Command-line interface for the frame authenticity detector.
//!
//! ## Usage
//! ```bash
//! aitube analyze frame1.jpg frame2.jpg frame3.jpg
//! aitube analyze *.png --engine heuristic --face-model seeta_fd_frontal_v1.0.bin --output json
//! ```

mod cli;

use aitube_detector::Result;

fn main() -> Result<()> {
    cli::run()
}
