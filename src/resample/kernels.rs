//! Interpolation kernels sampling a [`PixelBuffer`] at a continuous source
//! coordinate `(sx, sy)` in pixel-index space (pixel `i` sits at `i`).
//!
//! All four channels are interpolated.
use crate::error::EngineError;
use crate::image::rgba::clamp_round_u8;
use crate::image::{ImageView, PixelBuffer, Rgba};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    Nearest,
    Bilinear,
    #[default]
    Bicubic,
    Average,
}

impl Interpolation {
    pub const ALL: [Interpolation; 4] = [
        Interpolation::Nearest,
        Interpolation::Bilinear,
        Interpolation::Bicubic,
        Interpolation::Average,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Interpolation::Nearest => "nearest",
            Interpolation::Bilinear => "bilinear",
            Interpolation::Bicubic => "bicubic",
            Interpolation::Average => "average",
        }
    }

    /// Sample `src` at `(sx, sy)`. `src` must not be empty.
    #[inline]
    pub fn sample(self, src: &PixelBuffer, sx: f64, sy: f64) -> Rgba {
        match self {
            Interpolation::Nearest => nearest(src, sx, sy),
            Interpolation::Bilinear => bilinear(src, sx, sy),
            Interpolation::Bicubic => bicubic(src, sx, sy),
            Interpolation::Average => average(src, sx, sy),
        }
    }
}

impl FromStr for Interpolation {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interpolation::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                EngineError::invalid_parameter(
                    "interpolationMethod",
                    format!("unknown method `{s}` (nearest, bilinear, bicubic, average)"),
                )
            })
    }
}

impl std::fmt::Display for Interpolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// `floor(sx), floor(sy)` clamped into the buffer.
#[inline]
fn nearest(src: &PixelBuffer, sx: f64, sy: f64) -> Rgba {
    src.get_clamped(sx.floor() as isize, sy.floor() as isize)
}

/// Four-tap blend weighted by the fractional offsets.
fn bilinear(src: &PixelBuffer, sx: f64, sy: f64) -> Rgba {
    let x0 = sx.floor();
    let y0 = sy.floor();
    let dx = sx - x0;
    let dy = sy - y0;
    let (x0, y0) = (x0 as isize, y0 as isize);
    let x1 = (x0 + 1).min(src.width() as isize - 1);
    let y1 = (y0 + 1).min(src.height() as isize - 1);

    let p00 = src.get_clamped(x0, y0);
    let p10 = src.get_clamped(x1, y0);
    let p01 = src.get_clamped(x0, y1);
    let p11 = src.get_clamped(x1, y1);

    let mut out = [0u8; 4];
    for (c, o) in out.iter_mut().enumerate() {
        let v = p00[c] as f64 * (1.0 - dx) * (1.0 - dy)
            + p10[c] as f64 * dx * (1.0 - dy)
            + p01[c] as f64 * (1.0 - dx) * dy
            + p11[c] as f64 * dx * dy;
        *o = clamp_round_u8(v);
    }
    out
}

/// Cubic convolution weight (a = -0.5).
#[inline]
pub fn cubic(t: f64) -> f64 {
    let t = t.abs();
    if t <= 1.0 {
        (1.5 * t - 2.5) * t * t + 1.0
    } else if t < 2.0 {
        ((-0.5 * t + 2.5) * t - 4.0) * t + 2.0
    } else {
        0.0
    }
}

/// 4×4 cubic convolution normalised by the total weight.
fn bicubic(src: &PixelBuffer, sx: f64, sy: f64) -> Rgba {
    let ix = sx.floor() as isize;
    let iy = sy.floor() as isize;

    let mut sum = [0.0f64; 4];
    let mut weight_sum = 0.0;
    for m in -1..=2isize {
        let py = iy + m;
        let wy = cubic(sy - py as f64);
        for n in -1..=2isize {
            let px = ix + n;
            let weight = cubic(sx - px as f64) * wy;
            let value = src.get_clamped(px, py);
            for (s, &v) in sum.iter_mut().zip(&value) {
                *s += v as f64 * weight;
            }
            weight_sum += weight;
        }
    }
    if weight_sum.abs() < 1e-12 {
        return nearest(src, sx, sy);
    }
    sum.map(|s| clamp_round_u8(s / weight_sum))
}

/// Mean of the in-bounds 3×3 neighbourhood around `(floor sx, floor sy)`.
/// The divisor shrinks at the border; no clamping or mirroring.
fn average(src: &PixelBuffer, sx: f64, sy: f64) -> Rgba {
    let ix = sx.floor() as isize;
    let iy = sy.floor() as isize;
    let mut sum = [0u32; 4];
    let mut count = 0u32;
    for ny in iy - 1..=iy + 1 {
        for nx in ix - 1..=ix + 1 {
            if !src.in_bounds(nx, ny) {
                continue;
            }
            let px = src.get(nx as usize, ny as usize);
            for (s, &v) in sum.iter_mut().zip(&px) {
                *s += v as u32;
            }
            count += 1;
        }
    }
    if count == 0 {
        return nearest(src, sx, sy);
    }
    sum.map(|s| (s / count) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_kernel_shape() {
        assert_eq!(cubic(0.0), 1.0);
        assert_eq!(cubic(1.0), 0.0);
        assert_eq!(cubic(2.0), 0.0);
        assert_eq!(cubic(-1.5), cubic(1.5));
        assert!(cubic(1.5) < 0.0);
    }

    #[test]
    fn parse_method_names() {
        assert_eq!("Bilinear".parse::<Interpolation>().unwrap(), Interpolation::Bilinear);
        assert_eq!(" average ".parse::<Interpolation>().unwrap(), Interpolation::Average);
        assert!("lanczos".parse::<Interpolation>().is_err());
    }

    #[test]
    fn bilinear_blends_between_columns() {
        let src = PixelBuffer::from_fn(2, 1, |x, _| {
            if x == 0 {
                [0, 0, 0, 0]
            } else {
                [100, 200, 50, 255]
            }
        });
        assert_eq!(Interpolation::Bilinear.sample(&src, 0.5, 0.0), [50, 100, 25, 128]);
    }

    #[test]
    fn average_shrinks_divisor_at_corner() {
        let src = PixelBuffer::from_fn(3, 3, |x, y| {
            let v = (y * 3 + x) as u8 * 10;
            [v, v, v, 255]
        });
        // Corner window covers (0,0),(1,0),(0,1),(1,1): 0+10+30+40 = 80 / 4.
        assert_eq!(Interpolation::Average.sample(&src, 0.0, 0.0), [20, 20, 20, 255]);
    }

    #[test]
    fn integer_coordinates_reproduce_source() {
        let src = PixelBuffer::from_fn(5, 4, |x, y| [(x * 40) as u8, (y * 60) as u8, 7, 255]);
        for method in [Interpolation::Nearest, Interpolation::Bilinear, Interpolation::Bicubic] {
            for y in 0..4 {
                for x in 0..5 {
                    assert_eq!(
                        method.sample(&src, x as f64, y as f64),
                        src.get(x, y),
                        "{method} at ({x},{y})"
                    );
                }
            }
        }
    }
}
