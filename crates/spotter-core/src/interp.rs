//! Continuous-coordinate sampling strategies.

use crate::image::ChannelPlane;

/// Turns a continuous position on one colour plane into a sample value.
///
/// The owning image resolves bounds and padding before delegating here, so
/// a strategy may assume the plane is non-empty and the position is inside
/// the inclusive `[0, width] x [0, height]` domain.
pub trait Interpolator {
    fn interpolate(&self, plane: &ChannelPlane<'_>, x: f64, y: f64) -> f64;
}

/// Edge-clamped bilinear interpolation.
///
/// The four neighbouring samples are blended by the fractional parts of
/// the position; floor and ceiling indices clamp to the plane, so positions
/// past the last pixel centre degrade to the edge sample instead of
/// reading out of range.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bilinear;

impl Interpolator for Bilinear {
    fn interpolate(&self, plane: &ChannelPlane<'_>, x: f64, y: f64) -> f64 {
        let x0 = clamp_index(x.floor(), plane.width());
        let x1 = clamp_index(x.ceil(), plane.width());
        let y0 = clamp_index(y.floor(), plane.height());
        let y1 = clamp_index(y.ceil(), plane.height());

        let q00 = plane.at(x0, y0);
        let q10 = plane.at(x1, y0);
        let q01 = plane.at(x0, y1);
        let q11 = plane.at(x1, y1);

        let fx = x.fract();
        let fy = y.fract();

        q00 + fx * (q10 - q00) + fy * (q01 - q00) + fx * fy * (q00 + q11 - q01 - q10)
    }
}

/// Round-to-nearest sampling.
#[derive(Clone, Copy, Debug, Default)]
pub struct Nearest;

impl Interpolator for Nearest {
    fn interpolate(&self, plane: &ChannelPlane<'_>, x: f64, y: f64) -> f64 {
        plane.at(
            clamp_index(x.round(), plane.width()),
            clamp_index(y.round(), plane.height()),
        )
    }
}

/// Map a continuous index onto `[0, len)`; anything past either end reuses
/// the edge index. `len` must be positive.
#[inline]
fn clamp_index(value: f64, len: usize) -> usize {
    if value <= 0.0 {
        0
    } else {
        (value as usize).min(len - 1)
    }
}
