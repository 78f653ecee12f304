//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides which region to keep and how large the output is) and the
//! [`backend`](super::backend) (which does the pixel work). A mock backend can
//! record them without touching any image.
//!
//! ## Types
//!
//! - [`Compression`]: PNG deflate effort. `best` is the slow, smallest-file setting.
//! - [`RenderParams`]: one crop-then-resize render: source, output, crop box, output size.

use super::calculations::CropBox;
use image::codecs::png::CompressionType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// PNG compression effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    Fast,
    Default,
    #[default]
    Best,
}

impl Compression {
    pub fn png_type(self) -> CompressionType {
        match self {
            Compression::Fast => CompressionType::Fast,
            Compression::Default => CompressionType::Default,
            Compression::Best => CompressionType::Best,
        }
    }
}

/// Parameters for a single crop + resize render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Region of the source to keep, in source pixels.
    pub crop: CropBox,
    /// Exact output dimensions.
    pub width: u32,
    pub height: u32,
    /// Force an RGBA8 output (icons keep their transparency).
    pub rgba: bool,
    pub compression: Compression,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compression_default_is_best() {
        assert_eq!(Compression::default(), Compression::Best);
        assert!(matches!(
            Compression::default().png_type(),
            CompressionType::Best
        ));
    }

    #[test]
    fn compression_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            compression: Compression,
        }
        let w: Wrapper = toml::from_str(r#"compression = "fast""#).unwrap();
        assert_eq!(w.compression, Compression::Fast);
        assert!(toml::from_str::<Wrapper>(r#"compression = "max""#).is_err());
    }
}
