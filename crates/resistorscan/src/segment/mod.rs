//! Foreground segmentation into per-component regions.
//!
//! Pipeline: luma → threshold → 8-connected labels → bounding boxes → crops.
//! Regions are returned in ascending label order.

mod bbox;

pub use bbox::{bounding_box, component_stats, BoundingBox, LabelImage};

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::region_labelling::{connected_components, Connectivity};

const DEFAULT_BACKGROUND_THRESHOLD: u8 = 245;
const DEFAULT_MIN_PIXEL_COUNT: usize = 100;

/// Segmentation parameters.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    /// Pixels with luma strictly below this are foreground.
    pub background_threshold: u8,
    /// Components with at most this many pixels are dropped.
    pub min_pixel_count: usize,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            background_threshold: DEFAULT_BACKGROUND_THRESHOLD,
            min_pixel_count: DEFAULT_MIN_PIXEL_COUNT,
        }
    }
}

/// One connected component cropped to its bounding box.
#[derive(Debug, Clone)]
pub struct Region {
    /// Component label in the full-image label grid.
    pub label: u32,
    /// Box in full-image coordinates.
    pub bbox: BoundingBox,
    /// Color crop; every pixel outside the component is white.
    pub image: RgbImage,
    /// Component mask (255 inside, 0 outside), same shape as `image`.
    pub mask: GrayImage,
    /// Number of component pixels.
    pub pixel_count: usize,
}

/// Binary foreground mask (255 = foreground).
pub fn foreground_mask(image: &RgbImage, background_threshold: u8) -> GrayImage {
    let luma = image::imageops::grayscale(image);
    let mut mask = GrayImage::new(luma.width(), luma.height());
    for (x, y, p) in luma.enumerate_pixels() {
        if p[0] < background_threshold {
            mask.put_pixel(x, y, Luma([255]));
        }
    }
    mask
}

/// 8-connected component labels of a binary mask.
pub fn label_components(mask: &GrayImage) -> LabelImage {
    connected_components(mask, Connectivity::Eight, Luma([0u8]))
}

/// Crop one label's box out of `image` and `labels`.
pub fn crop_region(
    image: &RgbImage,
    labels: &LabelImage,
    label: u32,
    bbox: BoundingBox,
    pixel_count: usize,
) -> Region {
    let (w, h) = (bbox.width(), bbox.height());
    let mut crop = RgbImage::from_pixel(w, h, Rgb([255, 255, 255]));
    let mut mask = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let (sx, sy) = (bbox.left + x, bbox.top + y);
            if labels.get_pixel(sx, sy)[0] == label {
                mask.put_pixel(x, y, Luma([255]));
                crop.put_pixel(x, y, *image.get_pixel(sx, sy));
            }
        }
    }
    Region {
        label,
        bbox,
        image: crop,
        mask,
        pixel_count,
    }
}

/// Split an image into foreground component regions.
pub fn segment(image: &RgbImage, config: &SegmentConfig) -> Vec<Region> {
    let mask = foreground_mask(image, config.background_threshold);
    let labels = label_components(&mask);
    let stats = component_stats(&labels);

    let mut regions = Vec::new();
    let mut dropped = 0usize;
    for (i, stat) in stats.into_iter().enumerate() {
        let Some((bbox, count)) = stat else {
            continue;
        };
        if count <= config.min_pixel_count {
            dropped += 1;
            continue;
        }
        regions.push(crop_region(image, &labels, i as u32 + 1, bbox, count));
    }
    tracing::debug!(
        "{} regions kept, {} below {} px dropped",
        regions.len(),
        dropped,
        config.min_pixel_count
    );
    regions
}
