//! Orientation geometry of segmented components.
//!
//! - `moments`: centroid, inertia tensor, principal axis and central line.
//! - `rotate`: similarity rotation about a point with nearest/bilinear sampling.
//! - `canonical`: rotate a region so its body axis is vertical, then crop.

pub mod canonical;
pub mod moments;
pub mod rotate;

pub use canonical::{
    canonical_view, canonical_view_with_axis, crop_to_fixed_size, crop_window, CanonicalConfig,
    CanonicalView, CropWindow,
};
pub use moments::{canonical_rotation_deg, central_line, centroid, inertia_tensor, principal_axis};
pub use rotate::{rotate_about, rotate_by_angle, Sampling};

use image::{DynamicImage, GrayImage};

/// Shape / dimensionality failures of geometry operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// The operation needs a single-channel image.
    NotSingleChannel {
        /// Channel count of the offending image.
        channels: u8,
    },
    /// The mask has no non-zero pixel.
    EmptyMask,
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotSingleChannel { channels } => write!(
                f,
                "expected a single-channel image, got {} channels",
                channels
            ),
            Self::EmptyMask => write!(f, "mask has no foreground pixels"),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Mean position of the non-zero pixels of a mask.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
}

impl Centroid {
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Line through two points, used for principal / central axes.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisLine {
    pub a: [f64; 2],
    pub b: [f64; 2],
}

impl AxisLine {
    /// Direction angle `atan2(b.y - a.y, b.x - a.x)` in degrees.
    pub fn angle_deg(&self) -> f64 {
        (self.b[1] - self.a[1])
            .atan2(self.b[0] - self.a[0])
            .to_degrees()
    }

    /// Mirror both endpoints horizontally within an image of `width`.
    pub fn flipped_horizontally(&self, width: f64) -> Self {
        Self {
            a: [width - self.a[0], self.a[1]],
            b: [width - self.b[0], self.b[1]],
        }
    }
}

/// Interpret a loosely typed image as a single-channel mask.
///
/// 8- and 16-bit luma images are accepted; anything with more than one
/// channel fails with [`GeometryError::NotSingleChannel`].
pub fn single_channel(image: &DynamicImage) -> Result<GrayImage, GeometryError> {
    match image {
        DynamicImage::ImageLuma8(gray) => Ok(gray.clone()),
        DynamicImage::ImageLuma16(_) => Ok(image.to_luma8()),
        other => Err(GeometryError::NotSingleChannel {
            channels: other.color().channel_count(),
        }),
    }
}
