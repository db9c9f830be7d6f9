//! Shared synthetic images for unit tests.

use image::{GrayImage, Luma, Rgb, RgbImage};

/// Binary ellipse mask.
///
/// The major axis points along `angle_deg` in image coordinates (y down).
pub(crate) fn draw_ellipse_mask(
    w: u32,
    h: u32,
    center: [f64; 2],
    semi_major: f64,
    semi_minor: f64,
    angle_deg: f64,
) -> GrayImage {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let mut mask = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let dx = x as f64 - center[0];
            let dy = y as f64 - center[1];
            let u = (dx * cos + dy * sin) / semi_major;
            let v = (-dx * sin + dy * cos) / semi_minor;
            if u * u + v * v <= 1.0 {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
    }
    mask
}

/// Fill an axis-aligned rectangle, clipped to the image.
pub(crate) fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgb<u8>) {
    for y in y0..(y0 + h).min(img.height()) {
        for x in x0..(x0 + w).min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

/// Stack horizontal stripes `(rows, color)` top to bottom.
pub(crate) fn paint_rows(width: u32, stripes: &[(u32, [u8; 3])]) -> RgbImage {
    let height: u32 = stripes.iter().map(|&(n, _)| n).sum();
    let mut img = RgbImage::new(width, height);
    let mut y = 0;
    for &(n, color) in stripes {
        fill_rect(&mut img, 0, y, width, n, Rgb(color));
        y += n;
    }
    img
}

/// Rectangular resistor body with painted bands.
pub(crate) struct ResistorDrawing {
    pub center: [f64; 2],
    /// Body extent along its axis.
    pub length: f64,
    /// Body extent across its axis.
    pub width: f64,
    /// Axis direction in image coordinates (y down).
    pub tilt_deg: f64,
    pub body: [u8; 3],
    pub band_width: f64,
    /// Band centers as signed offsets along the axis, with their colors.
    pub bands: Vec<(f64, [u8; 3])>,
}

/// Paint a resistor onto `img` without anti-aliasing.
pub(crate) fn draw_resistor(img: &mut RgbImage, d: &ResistorDrawing) {
    let (sin, cos) = d.tilt_deg.to_radians().sin_cos();
    let (half_len, half_w) = (d.length / 2.0, d.width / 2.0);
    let half_band = d.band_width / 2.0;
    let (w, h) = img.dimensions();
    for y in 0..h {
        for x in 0..w {
            let dx = x as f64 - d.center[0];
            let dy = y as f64 - d.center[1];
            let u = dx * cos + dy * sin;
            let v = -dx * sin + dy * cos;
            if u.abs() >= half_len || v.abs() >= half_w {
                continue;
            }
            let color = d
                .bands
                .iter()
                .find(|(c, _)| (u - c).abs() < half_band)
                .map_or(d.body, |&(_, rgb)| rgb);
            img.put_pixel(x, y, Rgb(color));
        }
    }
}
