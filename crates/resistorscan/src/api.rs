//! High-level reading API.
//!
//! [`ResistorReader`] is the primary entry point. It wraps a
//! [`ReaderConfig`] and reads every resistor in an image.

use image::RgbImage;
use std::path::Path;

use crate::pipeline::{self, ReaderConfig, ResistorReading, ScanResult};
use crate::segment::Region;

/// Primary reading interface.
///
/// Create once, read many images.
///
/// # Examples
///
/// ```no_run
/// use resistorscan::ResistorReader;
/// use image::RgbImage;
///
/// let reader = ResistorReader::new();
/// let image = RgbImage::new(640, 480);
/// let result = reader.read(&image);
/// println!("Found {} resistors", result.readings.len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResistorReader {
    config: ReaderConfig,
}

impl ResistorReader {
    /// Create a reader with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with full config control.
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Load configuration JSON and create a reader in one step.
    pub fn from_config_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::with_config(ReaderConfig::from_json_file(path)?))
    }

    /// Access the current configuration.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Mutable access to configuration for post-construction tuning.
    pub fn config_mut(&mut self) -> &mut ReaderConfig {
        &mut self.config
    }

    /// Segment an image and read every resistor in it.
    pub fn read(&self, image: &RgbImage) -> ScanResult {
        pipeline::read_image(image, &self.config)
    }

    /// Read a region the caller segmented itself.
    pub fn read_region(&self, region: &Region) -> ResistorReading {
        pipeline::read_region(region, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::segment;
    use crate::test_utils::{draw_resistor, ResistorDrawing};
    use image::Rgb;

    fn scene() -> RgbImage {
        let mut img = RgbImage::from_pixel(200, 200, Rgb([255, 255, 255]));
        draw_resistor(
            &mut img,
            &ResistorDrawing {
                center: [100.0, 100.0],
                length: 121.0,
                width: 31.0,
                tilt_deg: 40.0,
                body: [205, 205, 195],
                band_width: 10.0,
                bands: vec![
                    (-35.5, [230, 190, 6]),
                    (-17.5, [196, 140, 182]),
                    (0.5, [220, 117, 75]),
                    (36.5, [180, 150, 60]),
                ],
            },
        );
        img
    }

    #[test]
    fn reader_reads_scene() {
        let reader = ResistorReader::new();
        let result = reader.read(&scene());
        assert_eq!(result.image_size, [200, 200]);
        let (_, value) = result.decoded().next().unwrap();
        // yellow violet orange gold: 47 kΩ ±5 %
        approx::assert_abs_diff_eq!(value.ohms, 47_000.0, epsilon = 1e-6);
        approx::assert_abs_diff_eq!(value.tolerance_percent, 5.0);
    }

    #[test]
    fn read_region_matches_full_read() {
        let reader = ResistorReader::new();
        let img = scene();
        let regions = segment(&img, &reader.config().segment);
        assert_eq!(regions.len(), 1);
        let single = reader.read_region(&regions[0]);
        let full = reader.read(&img);
        assert_eq!(single.band_colors(), full.readings[0].band_colors());
    }

    #[test]
    fn config_mut_changes_segmentation() {
        let mut reader = ResistorReader::new();
        reader.config_mut().segment.min_pixel_count = 1_000_000;
        assert!(reader.read(&scene()).readings.is_empty());
    }
}
