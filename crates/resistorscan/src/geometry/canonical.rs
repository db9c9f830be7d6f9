//! Canonical (axis-vertical, fixed-window) view of a segmented region.

use image::{DynamicImage, GenericImageView, GrayImage, Luma, Rgb, RgbImage};

use super::moments::{canonical_rotation_deg, central_line, centroid};
use super::rotate::{rotate_about, Sampling};
use super::{AxisLine, Centroid, GeometryError};
use crate::segment::Region;

const DEFAULT_CROP_WIDTH: u32 = 60;
const DEFAULT_CROP_HEIGHT: u32 = 200;

/// Size of the window cut around the rotated body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CanonicalConfig {
    pub crop_width: u32,
    pub crop_height: u32,
}

impl Default for CanonicalConfig {
    fn default() -> Self {
        Self {
            crop_width: DEFAULT_CROP_WIDTH,
            crop_height: DEFAULT_CROP_HEIGHT,
        }
    }
}

/// Half-open pixel window `[x0, x1) × [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl CropWindow {
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
}

fn clamped_span(center: f64, half: u32, len: u32) -> (u32, u32) {
    let lo = (center - half as f64).trunc().clamp(0.0, len as f64) as u32;
    let hi = (center + half as f64).trunc().clamp(0.0, len as f64) as u32;
    (lo, hi.max(lo))
}

/// Window of at most `crop_w × crop_h` centered on `c`, clamped to the image.
///
/// Halves are integer halves of the requested size; bounds are truncated.
pub fn crop_window(c: Centroid, crop_w: u32, crop_h: u32, width: u32, height: u32) -> CropWindow {
    let (x0, x1) = clamped_span(c.x, crop_w / 2, width);
    let (y0, y1) = clamped_span(c.y, crop_h / 2, height);
    CropWindow { x0, y0, x1, y1 }
}

/// Crop around the centroid of non-zero intensity.
///
/// Color inputs are reduced to luma to locate the centroid; the crop itself
/// keeps the input's color type.
pub fn crop_to_fixed_size(
    image: &DynamicImage,
    crop_w: u32,
    crop_h: u32,
) -> Result<DynamicImage, GeometryError> {
    let luma = image.to_luma8();
    let c = centroid(&luma)?;
    let win = crop_window(c, crop_w, crop_h, image.width(), image.height());
    Ok(image.crop_imm(win.x0, win.y0, win.width(), win.height()))
}

/// Region rotated so its body axis is vertical, cut to a fixed window.
#[derive(Debug, Clone)]
pub struct CanonicalView {
    /// Rotated, cropped color image.
    pub image: RgbImage,
    /// Rotated, cropped mask aligned with `image`.
    pub mask: GrayImage,
    /// Body axis the rotation was derived from, in region coordinates.
    pub axis: AxisLine,
    /// Rotation applied, in degrees.
    pub rotation_deg: f64,
    /// Mask centroid in region coordinates.
    pub centroid: Centroid,
}

/// Pad to a centered square whose side covers the diagonal, so no body
/// pixel leaves the canvas under any rotation.
fn pad_for_rotation(region: &Region) -> (RgbImage, GrayImage, u32, u32) {
    let (w, h) = region.image.dimensions();
    let side = ((w as f64).hypot(h as f64).ceil() as u32).max(w).max(h);
    let ox = (side - w) / 2;
    let oy = (side - h) / 2;

    let mut image = RgbImage::from_pixel(side, side, Rgb([255, 255, 255]));
    let mut mask = GrayImage::new(side, side);
    image::imageops::replace(&mut image, &region.image, ox as i64, oy as i64);
    image::imageops::replace(&mut mask, &region.mask, ox as i64, oy as i64);
    (image, mask, ox, oy)
}

fn crop_rgb(image: &RgbImage, win: CropWindow) -> RgbImage {
    image
        .view(win.x0, win.y0, win.width(), win.height())
        .to_image()
}

fn crop_gray(image: &GrayImage, win: CropWindow) -> GrayImage {
    image
        .view(win.x0, win.y0, win.width(), win.height())
        .to_image()
}

/// Rotate a region's color crop and mask so the body axis is vertical and cut
/// the fixed window around the rotated mask's centroid.
///
/// Masks are resampled nearest-neighbour, colors bilinearly; both fill with
/// zero where the rotation uncovers the canvas.
pub fn canonical_view(
    region: &Region,
    config: &CanonicalConfig,
) -> Result<CanonicalView, GeometryError> {
    let axis = central_line(&region.mask)?;
    let c = centroid(&region.mask)?;
    canonical_view_with_axis(region, &axis, c, config)
}

/// [`canonical_view`] with a caller-supplied body axis and pivot.
///
/// `axis` and `c` are in region coordinates. The rotation is
/// [`canonical_rotation_deg`] of `axis`, applied about `c`.
pub fn canonical_view_with_axis(
    region: &Region,
    axis: &AxisLine,
    c: Centroid,
    config: &CanonicalConfig,
) -> Result<CanonicalView, GeometryError> {
    let rotation_deg = canonical_rotation_deg(axis);

    let (image, mask, ox, oy) = pad_for_rotation(region);
    let pivot = [c.x + ox as f64, c.y + oy as f64];
    let rot_mask = rotate_about(&mask, pivot, rotation_deg, Sampling::Nearest, Luma([0]));
    let rot_image = rotate_about(
        &image,
        pivot,
        rotation_deg,
        Sampling::Bilinear,
        Rgb([0, 0, 0]),
    );

    let rc = centroid(&rot_mask)?;
    let win = crop_window(
        rc,
        config.crop_width,
        config.crop_height,
        rot_mask.width(),
        rot_mask.height(),
    );
    tracing::trace!(
        rotation_deg,
        x0 = win.x0,
        y0 = win.y0,
        w = win.width(),
        h = win.height(),
        "canonical window"
    );

    Ok(CanonicalView {
        image: crop_rgb(&rot_image, win),
        mask: crop_gray(&rot_mask, win),
        axis: *axis,
        rotation_deg,
        centroid: c,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::BoundingBox;
    use crate::test_utils::draw_ellipse_mask;
    use approx::assert_abs_diff_eq;

    fn angle_gap_mod_180(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(180.0);
        d.min(180.0 - d)
    }

    fn region_from_mask(mask: GrayImage) -> Region {
        let (w, h) = mask.dimensions();
        let mut image = RgbImage::from_pixel(w, h, Rgb([255, 255, 255]));
        let mut count = 0;
        for (x, y, p) in mask.enumerate_pixels() {
            if p[0] > 0 {
                image.put_pixel(x, y, Rgb([120, 80, 60]));
                count += 1;
            }
        }
        Region {
            label: 1,
            bbox: BoundingBox {
                left: 0,
                top: 0,
                right: w - 1,
                bottom: h - 1,
            },
            image,
            mask,
            pixel_count: count,
        }
    }

    #[test]
    fn window_never_exceeds_request() {
        let cases = [
            (Centroid { x: 50.0, y: 50.0 }, (100, 100)),
            (Centroid { x: 2.0, y: 3.0 }, (100, 100)),
            (Centroid { x: 98.5, y: 99.9 }, (100, 100)),
            (Centroid { x: 10.0, y: 10.0 }, (12, 8)),
        ];
        for (c, (w, h)) in cases {
            let win = crop_window(c, 60, 40, w, h);
            assert!(win.width() <= 60 && win.height() <= 40, "{:?}", win);
            assert!(win.x1 <= w && win.y1 <= h);
        }
        let win = crop_window(Centroid { x: 50.7, y: 50.2 }, 60, 41, 100, 100);
        assert_eq!((win.x0, win.x1, win.y0, win.y1), (20, 80, 30, 70));
    }

    #[test]
    fn window_is_clamped_not_wrapped_at_borders() {
        let win = crop_window(Centroid { x: 3.5, y: 95.0 }, 20, 20, 100, 100);
        assert_eq!((win.x0, win.x1), (0, 13));
        assert_eq!((win.y0, win.y1), (85, 100));
    }

    #[test]
    fn fixed_size_crop_of_color_image_keeps_color() {
        let mut img = RgbImage::from_pixel(50, 50, Rgb([0, 0, 0]));
        for y in 20..30 {
            for x in 10..20 {
                img.put_pixel(x, y, Rgb([90, 90, 90]));
            }
        }
        let out = crop_to_fixed_size(&DynamicImage::ImageRgb8(img), 8, 6).unwrap();
        assert_eq!(out.dimensions(), (8, 6));
        assert!(out.as_rgb8().is_some());
        assert!(out.to_rgb8().pixels().all(|p| p.0 == [90, 90, 90]));
    }

    #[test]
    fn fixed_size_crop_of_black_image_fails() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(10, 10));
        assert_eq!(
            crop_to_fixed_size(&img, 4, 4).err(),
            Some(GeometryError::EmptyMask)
        );
    }

    #[test]
    fn canonical_view_makes_body_vertical() {
        for tilt in [0.0, 30.0, 75.0, 135.0] {
            let mask = draw_ellipse_mask(140, 140, [70.0, 70.0], 55.0, 12.0, tilt);
            let region = region_from_mask(mask);
            let view = canonical_view(&region, &CanonicalConfig::default()).unwrap();

            assert!(angle_gap_mod_180(view.axis.angle_deg(), tilt) < 1.0);
            let line = central_line(&view.mask).unwrap();
            assert_abs_diff_eq!(line.angle_deg(), 90.0, epsilon = 2.0);
            assert!(view.image.width() <= 60 && view.image.height() <= 200);
            assert_eq!(view.image.dimensions(), view.mask.dimensions());
        }
    }

    #[test]
    fn supplied_axis_drives_the_rotation() {
        let mask = draw_ellipse_mask(140, 140, [70.0, 70.0], 55.0, 12.0, 30.0);
        let region = region_from_mask(mask);
        let cfg = CanonicalConfig {
            crop_width: 200,
            crop_height: 200,
        };
        let c = centroid(&region.mask).unwrap();

        let own = canonical_view(&region, &cfg).unwrap();
        let same =
            canonical_view_with_axis(&region, &central_line(&region.mask).unwrap(), c, &cfg)
                .unwrap();
        assert_abs_diff_eq!(own.rotation_deg, same.rotation_deg, epsilon = 1e-12);
        assert_eq!(own.mask, same.mask);

        // An already-vertical axis means no rotation: the body keeps its tilt.
        let vertical = AxisLine {
            a: [c.x, 0.0],
            b: [c.x, 140.0],
        };
        let kept = canonical_view_with_axis(&region, &vertical, c, &cfg).unwrap();
        assert_abs_diff_eq!(kept.rotation_deg, 0.0, epsilon = 1e-12);
        assert_eq!(kept.axis, vertical);
        let line = central_line(&kept.mask).unwrap();
        assert!(angle_gap_mod_180(line.angle_deg(), 30.0) < 2.0);
    }

    #[test]
    fn canonical_view_keeps_whole_body() {
        let mask = draw_ellipse_mask(140, 140, [70.0, 70.0], 55.0, 12.0, 30.0);
        let region = region_from_mask(mask);
        let view = canonical_view(&region, &CanonicalConfig::default()).unwrap();
        let kept = view.mask.pixels().filter(|p| p[0] > 0).count();
        let ratio = kept as f64 / region.pixel_count as f64;
        assert!((0.97..=1.03).contains(&ratio), "kept ratio {ratio}");
    }
}
