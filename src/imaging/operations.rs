//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{Anchor, CropBox, CropError, compute_crop_box, square_crop_box};
use super::params::{Compression, RenderParams};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OperationError {
    #[error("Crop failed: {0}")]
    Crop(#[from] CropError),
    #[error("Image processing failed: {0}")]
    Backend(#[from] BackendError),
}

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, OperationError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok(dims.as_tuple())
}

/// Configuration for a store-listing image (screenshot, promo tile).
#[derive(Debug, Clone)]
pub struct StoreImageConfig {
    pub target: (u32, u32),
    pub anchor: Anchor,
    pub compression: Compression,
}

impl Default for StoreImageConfig {
    fn default() -> Self {
        Self {
            target: (1280, 800),
            anchor: Anchor::Center,
            compression: Compression::default(),
        }
    }
}

/// What was done to produce a store image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreImage {
    pub source_dims: (u32, u32),
    pub crop: CropBox,
}

/// Plan a store-image render without executing it.
pub fn plan_store_image(
    source: &Path,
    output: &Path,
    source_dims: (u32, u32),
    config: &StoreImageConfig,
) -> std::result::Result<RenderParams, CropError> {
    let (target_w, target_h) = config.target;
    let crop = compute_crop_box(
        source_dims.0,
        source_dims.1,
        target_w,
        target_h,
        config.anchor,
    )?;

    Ok(RenderParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        crop,
        width: target_w,
        height: target_h,
        rgba: false,
        compression: config.compression,
    })
}

/// Identify, crop to the target ratio, resize to the exact target size, save.
pub fn create_store_image(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    config: &StoreImageConfig,
) -> Result<StoreImage> {
    let source_dims = get_dimensions(backend, source)?;
    let params = plan_store_image(source, output, source_dims, config)?;
    backend.crop_resize(&params)?;
    Ok(StoreImage {
        source_dims,
        crop: params.crop,
    })
}

/// Configuration for an extension icon set.
#[derive(Debug, Clone)]
pub struct IconSetConfig {
    pub sizes: Vec<u32>,
    /// File name prefix: `logo` → `logo-16.png`, `logo-48.png`, ...
    pub prefix: String,
    pub compression: Compression,
}

impl Default for IconSetConfig {
    fn default() -> Self {
        Self {
            sizes: vec![16, 48, 128],
            prefix: "logo".to_string(),
            compression: Compression::default(),
        }
    }
}

/// One generated icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconVariant {
    pub size: u32,
    pub path: PathBuf,
}

/// Plan the renders for an icon set without executing them.
///
/// Non-square logos are squared off around their center first, so no icon is
/// ever stretched.
pub fn plan_icon_set(
    source: &Path,
    output_dir: &Path,
    source_dims: (u32, u32),
    config: &IconSetConfig,
) -> std::result::Result<Vec<RenderParams>, CropError> {
    let crop = square_crop_box(source_dims.0, source_dims.1)?;

    config
        .sizes
        .iter()
        .map(|&size| {
            if size == 0 {
                return Err(CropError::InvalidDimension { field: "icon size" });
            }
            Ok(RenderParams {
                source: source.to_path_buf(),
                output: output_dir.join(format!("{}-{}.png", config.prefix, size)),
                crop,
                width: size,
                height: size,
                rgba: true,
                compression: config.compression,
            })
        })
        .collect()
}

/// Write one square RGBA PNG per configured size.
pub fn create_icon_set(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    config: &IconSetConfig,
) -> Result<Vec<IconVariant>> {
    let source_dims = get_dimensions(backend, source)?;
    let plans = plan_icon_set(source, output_dir, source_dims, config)?;

    let mut variants = Vec::with_capacity(plans.len());
    for params in plans {
        backend.crop_resize(&params)?;
        variants.push(IconVariant {
            size: params.width,
            path: params.output,
        });
    }
    Ok(variants)
}
