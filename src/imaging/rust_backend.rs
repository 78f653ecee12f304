//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` (header only) |
//! | Decode (PNG) | `image::ImageReader` |
//! | Crop | `DynamicImage::crop_imm` |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (configurable deflate, adaptive filter) |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{Compression, RenderParams};
use image::codecs::png::{FilterType as PngFilterType, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Encode and save as PNG. Any other output extension is rejected.
fn save_png(img: &DynamicImage, path: &Path, compression: Compression) -> Result<(), BackendError> {
    if !is_png(path) {
        return Err(BackendError::ProcessingFailed(format!(
            "Unsupported output format: {}",
            path.display()
        )));
    }
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    let encoder =
        PngEncoder::new_with_quality(writer, compression.png_type(), PngFilterType::Adaptive);
    img.write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("PNG encode failed: {}", e)))
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
        })?;
        Ok(Dimensions { width, height })
    }

    fn crop_resize(&self, params: &RenderParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let crop = params.crop;

        // crop_imm silently clamps; a box from another image is a caller bug
        if crop.right > img.width() || crop.bottom > img.height() {
            return Err(BackendError::ProcessingFailed(format!(
                "Crop box {} exceeds {}x{} source {}",
                crop,
                img.width(),
                img.height(),
                params.source.display()
            )));
        }

        let cropped = img.crop_imm(crop.left, crop.top, crop.width(), crop.height());
        let resized = if (cropped.width(), cropped.height()) == (params.width, params.height) {
            cropped
        } else {
            cropped.resize_exact(params.width, params.height, FilterType::Lanczos3)
        };

        let final_img = if params.rgba {
            DynamicImage::ImageRgba8(resized.to_rgba8())
        } else {
            resized
        };

        save_png(&final_img, &params.output, params.compression)
    }
}
