//! Centred zoom at fixed output size.
//!
//! A window of `w / scale × h / scale` around the image centre is stretched
//! back to `w × h`. Destination pixel `(x, y)` samples source coordinate
//! `(crop_x + x / scale, crop_y + y / scale)`. When zooming out the window is
//! larger than the source and samples outside it stay transparent.
use super::kernels::Interpolation;
use super::scale::validate_scale;
use crate::cancel::CancelToken;
use crate::error::{EngineError, Result};
use crate::image::rgba::TRANSPARENT;
use crate::image::{ImageView, PixelBuffer};
use rayon::prelude::*;

/// Top-left corner `(x, y)` of the centred window for a `w × h` source.
pub fn zoom_window_origin(w: usize, h: usize, scale: f64) -> (f64, f64) {
    let (wf, hf) = (w as f64, h as f64);
    ((wf - wf / scale) / 2.0, (hf - hf / scale) / 2.0)
}

pub fn zoom(src: &PixelBuffer, scale: f64, method: Interpolation) -> Result<PixelBuffer> {
    zoom_inner(src, scale, method, None)
}

pub fn zoom_with_cancel(
    src: &PixelBuffer,
    scale: f64,
    method: Interpolation,
    cancel: &CancelToken,
) -> Result<PixelBuffer> {
    zoom_inner(src, scale, method, Some(cancel))
}

fn zoom_inner(
    src: &PixelBuffer,
    scale: f64,
    method: Interpolation,
    cancel: Option<&CancelToken>,
) -> Result<PixelBuffer> {
    validate_scale(scale)?;
    if src.is_empty() {
        return Err(EngineError::invalid_parameter(
            "buffer",
            "cannot zoom an empty buffer",
        ));
    }
    let (w, h) = (src.width(), src.height());
    let (crop_x, crop_y) = zoom_window_origin(w, h, scale);

    let mut out = PixelBuffer::new(w, h);
    out.pixels_mut()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, dst_row)| {
            if cancel.is_some_and(|c| c.is_cancelled()) {
                return;
            }
            let sy = crop_y + y as f64 / scale;
            let row_covered = (-0.5..h as f64 - 0.5).contains(&sy);
            for (x, dst_px) in dst_row.iter_mut().enumerate() {
                let sx = crop_x + x as f64 / scale;
                *dst_px = if row_covered && (-0.5..w as f64 - 0.5).contains(&sx) {
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
