//! Image processing in pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Crop box** | [`compute_crop_box`] (pure integer geometry) |
//! | **Crop + resize → PNG** | `crop_imm` + Lanczos3 `resize_exact` + `PngEncoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for crop geometry (unit testable)
//! - **Parameters**: Data structures describing a render
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{Anchor, CropBox, CropError, CropSpec, compute_crop_box, square_crop_box};
pub use operations::{
    IconSetConfig, IconVariant, OperationError, StoreImage, StoreImageConfig, create_icon_set,
    create_store_image, get_dimensions,
};
pub use params::{Compression, RenderParams};
pub use rust_backend::RustBackend;
