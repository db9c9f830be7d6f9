//! Data-directory image access.

use image::DynamicImage;
use std::path::{Path, PathBuf};

use crate::{CliError, CliResult};

/// Channel conversion applied after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    /// Keep the decoded color type.
    Native,
    Rgb,
}

/// Images addressed relative to a data directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    data_dir: PathBuf,
}

impl ImageStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Absolute (or data-dir-joined) path of `location`.
    pub fn resolve(&self, location: &Path) -> PathBuf {
        self.data_dir.join(location)
    }

    /// Decode the image at `location`, converting channels per `mode`.
    pub fn load(&self, location: &Path, mode: ChannelMode) -> CliResult<DynamicImage> {
        let path = self.resolve(location);
        let img = image::open(&path).map_err(|e| -> CliError {
            format!("Failed to open image {}: {}", path.display(), e).into()
        })?;
        Ok(match mode {
            ChannelMode::Native => img,
            ChannelMode::Rgb => DynamicImage::ImageRgb8(img.to_rgb8()),
        })
    }

    /// Encode `img` at `location`, creating parent directories.
    pub fn save(&self, location: &Path, img: &DynamicImage) -> CliResult<PathBuf> {
        let path = self.resolve(location);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        img.save(&path).map_err(|e| -> CliError {
            format!("Failed to write image {}: {}", path.display(), e).into()
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "resistorscan-store-{}-{}",
            tag,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn locations_are_relative_to_data_dir() {
        let store = ImageStore::new("/data/boards");
        assert_eq!(
            store.resolve(Path::new("a/b.png")),
            PathBuf::from("/data/boards/a/b.png")
        );
    }

    #[test]
    fn save_then_load_with_channel_modes() {
        let dir = scratch_dir("modes");
        let store = ImageStore::new(&dir);
        let mask = GrayImage::from_pixel(3, 2, Luma([255]));
        store
            .save(Path::new("nested/mask.png"), &DynamicImage::ImageLuma8(mask))
            .unwrap();

        let native = store
            .load(Path::new("nested/mask.png"), ChannelMode::Native)
            .unwrap();
        assert!(native.as_luma8().is_some());
        let rgb = store
            .load(Path::new("nested/mask.png"), ChannelMode::Rgb)
            .unwrap();
        assert!(rgb.as_rgb8().is_some());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_image_reports_path() {
        let store = ImageStore::new(scratch_dir("missing"));
        let err = store
            .load(Path::new("nope.png"), ChannelMode::Native)
            .unwrap_err();
        assert!(err.to_string().contains("nope.png"));
    }
}
