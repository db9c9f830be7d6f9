//! First and second moments of a binary mask.

use image::GrayImage;
use nalgebra::Matrix2;

use super::{AxisLine, Centroid, GeometryError};

/// Below this the axis has no usable vertical component.
const HORIZONTAL_EPS: f64 = 1e-9;

fn foreground_points(mask: &GrayImage) -> impl Iterator<Item = (f64, f64)> + '_ {
    mask.enumerate_pixels()
        .filter(|(_, _, p)| p[0] != 0)
        .map(|(x, y, _)| (x as f64, y as f64))
}

/// Mean pixel position of the non-zero mask pixels.
pub fn centroid(mask: &GrayImage) -> Result<Centroid, GeometryError> {
    let (mut sx, mut sy, mut n) = (0.0f64, 0.0f64, 0usize);
    for (x, y) in foreground_points(mask) {
        sx += x;
        sy += y;
        n += 1;
    }
    if n == 0 {
        return Err(GeometryError::EmptyMask);
    }
    Ok(Centroid {
        x: sx / n as f64,
        y: sy / n as f64,
    })
}

/// Un-normalized second-moment matrix of the mask about its centroid.
///
/// `Σ [dx dy]ᵀ [dx dy]` over all non-zero pixels.
pub fn inertia_tensor(mask: &GrayImage, c: Centroid) -> Matrix2<f64> {
    let (mut sxx, mut sxy, mut syy) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in foreground_points(mask) {
        let dx = x - c.x;
        let dy = y - c.y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }
    Matrix2::new(sxx, sxy, sxy, syy)
}

/// Principal axis of the mask, extended through the centroid to `y = 0` and
/// `y = height`.
///
/// The dominant eigenvector is taken in the vertically mirrored frame
/// `(vx, -vy)`; [`central_line`] undoes this with a horizontal flip. An axis
/// with no vertical component is extended along x instead, from `x = 0` to
/// `x = width` at the centroid row.
pub fn principal_axis(mask: &GrayImage) -> Result<AxisLine, GeometryError> {
    let c = centroid(mask)?;
    let eig = nalgebra::SymmetricEigen::new(inertia_tensor(mask, c));
    let major = if eig.eigenvalues[0] >= eig.eigenvalues[1] {
        0
    } else {
        1
    };
    let dir_x = eig.eigenvectors[(0, major)];
    let dir_y = -eig.eigenvectors[(1, major)];

    let (w, h) = (mask.width() as f64, mask.height() as f64);
    if dir_y.abs() < HORIZONTAL_EPS {
        return Ok(AxisLine {
            a: [0.0, c.y],
            b: [w, c.y],
        });
    }
    let x_at = |y: f64| (y - c.y) / dir_y * dir_x + c.x;
    Ok(AxisLine {
        a: [x_at(0.0), 0.0],
        b: [x_at(h), h],
    })
}

/// Body axis of the mask in image coordinates.
///
/// [`principal_axis`] followed by the horizontal flip `x → width − x` of both
/// endpoints. Its [`AxisLine::angle_deg`] is the body direction.
pub fn central_line(mask: &GrayImage) -> Result<AxisLine, GeometryError> {
    Ok(principal_axis(mask)?.flipped_horizontally(mask.width() as f64))
}

/// Rotation (degrees, counter-clockwise positive) that makes `line` vertical.
pub fn canonical_rotation_deg(line: &AxisLine) -> f64 {
    line.angle_deg() - 90.0
}
