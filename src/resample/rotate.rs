//! Rotation about the image centre onto a canvas that fits the rotated
//! bounds.
//!
//! Each destination pixel centre is mapped through the inverse rotation into
//! source space. Points that land outside the source stay transparent;
//! covered points are sampled with the selected [`Interpolation`] kernel.
use super::kernels::Interpolation;
use crate::cancel::CancelToken;
use crate::error::{EngineError, Result};
use crate::image::rgba::TRANSPARENT;
use crate::image::{ImageView, PixelBuffer};
use nalgebra::{Rotation2, Vector2};
use rayon::prelude::*;

/// Absorbs trigonometric round-off so right angles do not grow the canvas.
const CANVAS_EPS: f64 = 1e-9;
/// Mapped coordinates this close to a pixel index are treated as exact.
const SNAP_EPS: f64 = 1e-9;

#[inline]
fn snap(v: f64) -> f64 {
    let r = v.round();
    if (v - r).abs() < SNAP_EPS {
        r
    } else {
        v
    }
}

/// Canvas `(width, height)` bounding `w × h` rotated by `angle_deg`:
/// `ceil(|w cosθ| + |h sinθ|) × ceil(|w sinθ| + |h cosθ|)`, at least 1×1.
pub fn rotated_canvas(w: usize, h: usize, angle_deg: f64) -> (usize, usize) {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    let (wf, hf) = (w as f64, h as f64);
    let nw = (wf * cos + hf * sin - CANVAS_EPS).ceil().max(1.0) as usize;
    let nh = (wf * sin + hf * cos - CANVAS_EPS).ceil().max(1.0) as usize;
    (nw, nh)
}

pub fn rotate(src: &PixelBuffer, angle_deg: f64, method: Interpolation) -> Result<PixelBuffer> {
    rotate_inner(src, angle_deg, method, None)
}

pub fn rotate_with_cancel(
    src: &PixelBuffer,
    angle_deg: f64,
    method: Interpolation,
    cancel: &CancelToken,
) -> Result<PixelBuffer> {
    rotate_inner(src, angle_deg, method, Some(cancel))
}

fn rotate_inner(
    src: &PixelBuffer,
    angle_deg: f64,
    method: Interpolation,
    cancel: Option<&CancelToken>,
) -> Result<PixelBuffer> {
    if !angle_deg.is_finite() {
        return Err(EngineError::invalid_parameter(
            "rotationAngleDeg",
            format!("must be finite, got {angle_deg}"),
        ));
    }
    if src.is_empty() {
        return Err(EngineError::invalid_parameter(
            "buffer",
            "cannot rotate an empty buffer",
        ));
    }
    let (w, h) = (src.width(), src.height());
    let (nw, nh) = rotated_canvas(w, h, angle_deg);
    let inverse = Rotation2::new(-angle_deg.to_radians());
    let src_center = Vector2::new(w as f64 / 2.0, h as f64 / 2.0);
    let dst_center = Vector2::new(nw as f64 / 2.0, nh as f64 / 2.0);

    let mut out = PixelBuffer::new(nw, nh);
    out.pixels_mut()
        .par_chunks_mut(nw)
        .enumerate()
        .for_each(|(y, dst_row)| {
            if cancel.is_some_and(|c| c.is_cancelled()) {
                return;
            }
            for (x, dst_px) in dst_row.iter_mut().enumerate() {
                let d = Vector2::new(x as f64 + 0.5, y as f64 + 0.5) - dst_center;
                let s = inverse * d + src_center;
                // Back to pixel-index space, where pixel i sits at i.
                let (sx, sy) = (snap(s.x - 0.5), snap(s.y - 0.5));
                let covered = (-0.5..w as f64 - 0.5).contains(&sx)
                    && (-0.5..h as f64 - 0.5).contains(&sy);
                *dst_px = if covered {
                    method.sample(src, sx, sy)
                } else {
                    TRANSPARENT
                };
            }
        });

    if let Some(c) = cancel {
        c.check()?;
    }
    Ok(out)
}
