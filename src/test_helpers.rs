//! Shared test utilities for the shotcrop test suite.
//!
//! Provides synthetic PNG writers and a screenshot-directory fixture that
//! mimics what a macOS capture folder looks like (including the narrow
//! no-break space macOS puts before `AM`/`PM`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_screenshot_dir(&[("8.02.08", 1920, 1080)]);
//! let files = list_png_files(tmp.path()).unwrap();
//! assert_eq!(files, vec![screenshot_name("8.02.08")]);
//! ```

use image::{ImageEncoder, Rgb, RgbImage};
use std::path::Path;
use tempfile::TempDir;

// =========================================================================
// Synthetic images
// =========================================================================

fn write_png(path: &Path, img: &RgbImage) {
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::png::PngEncoder::new(writer)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();
}

/// Write a gradient PNG with the given dimensions.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    write_png(path, &img);
}

/// Write a PNG whose top half is pure red and bottom half pure blue.
pub fn create_banded_png(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |_, y| {
        if y < height / 2 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 255])
        }
    });
    write_png(path, &img);
}

// =========================================================================
// Screenshot directory fixture
// =========================================================================

/// macOS-style screenshot file name for a capture time like `8.02.08`.
///
/// The separator before `PM` is U+202F, as macOS writes it.
pub fn screenshot_name(time: &str) -> String {
    format!("Screenshot 2025-11-17 at {time}\u{202f}PM.png")
}

/// Create a temp dir holding one synthetic screenshot per `(time, w, h)`.
pub fn setup_screenshot_dir(shots: &[(&str, u32, u32)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for &(time, w, h) in shots {
        create_test_png(&tmp.path().join(screenshot_name(time)), w, h);
    }
    tmp
}
