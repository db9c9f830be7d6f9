//! Rotation of 8-bit images about an arbitrary center.
//!
//! Angles are in degrees, positive counter-clockwise as displayed: a direction
//! at image angle `φ` (y down) ends at `φ − angle`. Output keeps the input
//! dimensions; destination pixels whose source falls off the canvas take the
//! fill value.

use image::{ImageBuffer, Pixel, Rgb, RgbImage};

/// Source sampling used by [`rotate_about`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    /// Nearest pixel; keeps binary masks binary.
    Nearest,
    /// Bilinear blend of the four neighbours.
    Bilinear,
}

const MAX_CHANNELS: usize = 4;

fn on_canvas(v: f64, len: u32) -> bool {
    v >= -0.5 && v < len as f64 - 0.5
}

#[inline]
fn sample_nearest<P: Pixel<Subpixel = u8>>(
    img: &ImageBuffer<P, Vec<u8>>,
    x: f64,
    y: f64,
) -> Option<P> {
    let (w, h) = img.dimensions();
    if !on_canvas(x, w) || !on_canvas(y, h) {
        return None;
    }
    let xi = (x.round().max(0.0) as u32).min(w - 1);
    let yi = (y.round().max(0.0) as u32).min(h - 1);
    Some(*img.get_pixel(xi, yi))
}

#[inline]
fn sample_bilinear<P: Pixel<Subpixel = u8>>(
    img: &ImageBuffer<P, Vec<u8>>,
    x: f64,
    y: f64,
) -> Option<P> {
    let (w, h) = img.dimensions();
    if !on_canvas(x, w) || !on_canvas(y, h) {
        return None;
    }
    let x = x.clamp(0.0, (w - 1) as f64);
    let y = y.clamp(0.0, (h - 1) as f64);
    let x0 = (x.floor() as u32).min(w.saturating_sub(2));
    let y0 = (y.floor() as u32).min(h.saturating_sub(2));
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = img.get_pixel(x0, y0).channels();
    let p10 = img.get_pixel(x1, y0).channels();
    let p01 = img.get_pixel(x0, y1).channels();
    let p11 = img.get_pixel(x1, y1).channels();

    let n = P::CHANNEL_COUNT as usize;
    let mut out = [0u8; MAX_CHANNELS];
    for c in 0..n.min(MAX_CHANNELS) {
        let v = (1.0 - fx) * (1.0 - fy) * p00[c] as f64
            + fx * (1.0 - fy) * p10[c] as f64
            + (1.0 - fx) * fy * p01[c] as f64
            + fx * fy * p11[c] as f64;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    Some(*P::from_slice(&out[..n]))
}

/// Rotate `image` by `angle_deg` about `center` (pixel coordinates).
pub fn rotate_about<P: Pixel<Subpixel = u8>>(
    image: &ImageBuffer<P, Vec<u8>>,
    center: [f64; 2],
    angle_deg: f64,
    sampling: Sampling,
    fill: P,
) -> ImageBuffer<P, Vec<u8>> {
    let (w, h) = image.dimensions();
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let [cx, cy] = center;
    ImageBuffer::from_fn(w, h, |x, y| {
        let u = x as f64 - cx;
        let v = y as f64 - cy;
        let sx = cos * u - sin * v + cx;
        let sy = sin * u + cos * v + cy;
        let sample = match sampling {
            Sampling::Nearest => sample_nearest(image, sx, sy),
            Sampling::Bilinear => sample_bilinear(image, sx, sy),
        };
        sample.unwrap_or(fill)
    })
}

/// Rotate a color image about its center, filling uncovered pixels white.
pub fn rotate_by_angle(image: &RgbImage, angle_deg: f64) -> RgbImage {
    let center = [
        (image.width() as f64 - 1.0) / 2.0,
        (image.height() as f64 - 1.0) / 2.0,
    ];
    rotate_about(
        image,
        center,
        angle_deg,
        Sampling::Bilinear,
        Rgb([255, 255, 255]),
    )
}
