//! Pure calculation functions for crop geometry.
//!
//! All functions here are pure and testable without any I/O or images.
//!
//! The only real decision a store-listing crop has to make is which axis to
//! trim and which part of that axis to keep. A source that is relatively wider
//! than the target loses columns; one that is relatively taller (or exactly
//! matching) loses rows. The [`Anchor`] then picks the surviving strip.
//!
//! ```text
//! 1920x1080 → 1280x800, anchor=top
//!
//!   ┌──┬────────────────────┬──┐
//!   │  │                    │  │   source ratio 1.78 > target ratio 1.6
//!   │96│   1728 x 1080 kept │96│   → crop width, keep full height
//!   │  │                    │  │   → top/bottom don't apply horizontally,
//!   └──┴────────────────────┴──┘     so the strip is centered
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CropError {
    #[error("Invalid dimension: {field} must be a positive integer")]
    InvalidDimension { field: &'static str },
}

/// Which edge (or the middle) of the source image to preserve when cropping.
///
/// Horizontal anchors (`left`, `right`) only matter when the width is cropped;
/// vertical anchors (`top`, `bottom`) only when the height is. An anchor that
/// doesn't apply to the crop axis behaves as `center`.
///
/// Unknown names parse to [`Anchor::Center`] instead of failing, so a typo in a
/// config file degrades to a centered crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Anchor {
    Top,
    Bottom,
    Left,
    Right,
    #[default]
    Center,
}

impl Anchor {
    pub const ALL: [Anchor; 5] = [
        Anchor::Top,
        Anchor::Bottom,
        Anchor::Left,
        Anchor::Right,
        Anchor::Center,
    ];

    /// Parse an anchor name (case-insensitive). Anything unrecognized is `Center`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "top" => Anchor::Top,
            "bottom" => Anchor::Bottom,
            "left" => Anchor::Left,
            "right" => Anchor::Right,
            _ => Anchor::Center,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::Top => "top",
            Anchor::Bottom => "bottom",
            Anchor::Left => "left",
            Anchor::Right => "right",
            Anchor::Center => "center",
        }
    }
}

impl From<&str> for Anchor {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for Anchor {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rectangle to cut out of the source image, in source pixel coordinates.
///
/// Origin is top-left; `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropBox {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// True when the box covers the whole `(width, height)` source.
    pub fn is_full(&self, source: (u32, u32)) -> bool {
        self.left == 0 && self.top == 0 && (self.right, self.bottom) == source
    }
}

impl fmt::Display for CropBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Everything needed to compute a crop box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropSpec {
    pub source_width: u32,
    pub source_height: u32,
    pub target_width: u32,
    pub target_height: u32,
    pub anchor: Anchor,
}

impl CropSpec {
    pub fn crop_box(&self) -> Result<CropBox, CropError> {
        compute_crop_box(
            self.source_width,
            self.source_height,
            self.target_width,
            self.target_height,
            self.anchor,
        )
    }
}

/// Compute the region of the source to keep so that resizing it to the target
/// dimensions introduces no distortion.
///
/// Ratios are compared by cross-multiplication in `u64`, so a source whose
/// ratio exactly equals the target's is never cropped by a rounding artifact.
/// Lengths are `floor`ed and clamped to at least one pixel.
///
/// # Examples
/// ```
/// use shotcrop::imaging::{Anchor, CropBox, compute_crop_box};
///
/// let b = compute_crop_box(1200, 1800, 1280, 800, Anchor::Bottom).unwrap();
/// assert_eq!(b, CropBox { left: 0, top: 1050, right: 1200, bottom: 1800 });
/// ```
pub fn compute_crop_box(
    source_width: u32,
    source_height: u32,
    target_width: u32,
    target_height: u32,
    anchor: Anchor,
) -> Result<CropBox, CropError> {
    for (field, value) in [
        ("source_width", source_width),
        ("source_height", source_height),
        ("target_width", target_width),
        ("target_height", target_height),
    ] {
        if value == 0 {
            return Err(CropError::InvalidDimension { field });
        }
    }

    let (sw, sh) = (u64::from(source_width), u64::from(source_height));
    let (tw, th) = (u64::from(target_width), u64::from(target_height));

    if sw * th > tw * sh {
        // Relatively wider: keep full height, narrow the width.
        // sh * tw / th < sw on this branch, so the cast cannot truncate.
        let new_width = ((sh * tw / th) as u32).max(1);
        let spare = source_width - new_width;
        let left = match anchor {
            Anchor::Left => 0,
            Anchor::Right => spare,
            Anchor::Top | Anchor::Bottom | Anchor::Center => spare / 2,
        };
        Ok(CropBox {
            left,
            top: 0,
            right: left + new_width,
            bottom: source_height,
        })
    } else {
        // Relatively taller or equal: keep full width, shorten the height.
        let new_height = ((sw * th / tw) as u32).max(1);
        let spare = source_height - new_height;
        let top = match anchor {
            Anchor::Top => 0,
            Anchor::Bottom => spare,
            Anchor::Left | Anchor::Right | Anchor::Center => spare / 2,
        };
        Ok(CropBox {
            left: 0,
            top,
            right: source_width,
            bottom: top + new_height,
        })
    }
}

/// Crop box that squares off a source around its center (used for icons).
pub fn square_crop_box(source_width: u32, source_height: u32) -> Result<CropBox, CropError> {
    compute_crop_box(source_width, source_height, 1, 1, Anchor::Center)
}
