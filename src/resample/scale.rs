use super::kernels::Interpolation;
use crate::cancel::CancelToken;
use crate::error::{EngineError, Result};
use crate::image::rgba::CHANNELS;
use crate::image::{ImageView, PixelBuffer};
use rayon::prelude::*;

/// Output extent for one axis: `max(1, floor(dim · scale))`.
#[inline]
pub fn scaled_dimension(dim: usize, scale: f64) -> usize {
    ((dim as f64 * scale).floor() as usize).max(1)
}

/// Pixel count of a `width × height` output, rejecting sizes that overflow
/// the address space.
pub(crate) fn checked_area(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .filter(|n| n.checked_mul(CHANNELS).is_some_and(|b| b <= isize::MAX as usize))
        .ok_or_else(|| {
            EngineError::invalid_parameter(
                "scaleFactor",
                format!("output of {width}x{height} pixels is too large"),
            )
        })
}

pub(crate) fn validate_scale(scale: f64) -> Result<()> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(EngineError::invalid_parameter(
            "scaleFactor",
            format!("must be a positive finite number, got {scale}"),
        ))
    }
}

/// Rescale `src` by `scale` (upscale when > 1). Destination pixel `(x, y)`
/// samples source coordinate `(x / scale, y / scale)`.
pub fn resize(src: &PixelBuffer, scale: f64, method: Interpolation) -> Result<PixelBuffer> {
    resize_inner(src, scale, method, None)
}

pub fn resize_with_cancel(
    src: &PixelBuffer,
    scale: f64,
    method: Interpolation,
    cancel: &CancelToken,
) -> Result<PixelBuffer> {
    resize_inner(src, scale, method, Some(cancel))
}

fn resize_inner(
    src: &PixelBuffer,
    scale: f64,
    method: Interpolation,
    cancel: Option<&CancelToken>,
) -> Result<PixelBuffer> {
    validate_scale(scale)?;
    if src.is_empty() {
        return Err(EngineError::invalid_parameter(
            "buffer",
            "cannot resample an empty buffer",
        ));
    }
    let nw = scaled_dimension(src.width(), scale);
    let nh = scaled_dimension(src.height(), scale);
    checked_area(nw, nh)?;
    let mut out = PixelBuffer::new(nw, nh);

    out.pixels_mut()
        .par_chunks_mut(nw)
        .enumerate()
        .for_each(|(y, dst_row)| {
            if cancel.is_some_and(|c| c.is_cancelled()) {
                return;
            }
            let sy = y as f64 / scale;
            for (x, dst_px) in dst_row.iter_mut().enumerate() {
                *dst_px = method.sample(src, x as f64 / scale, sy);
            }
        });

    if let Some(c) = cancel {
        c.check()?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_dimensions_floor_with_minimum_one() {
        assert_eq!(scaled_dimension(10, 2.5), 25);
        assert_eq!(scaled_dimension(10, 0.25), 2);
        assert_eq!(scaled_dimension(3, 0.1), 1);
    }

    #[test]
    fn rejects_non_positive_scale() {
        let src = PixelBuffer::new(4, 4);
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(resize(&src, bad, Interpolation::Nearest).is_err(), "{bad}");
        }
    }

    #[test]
    fn rejects_scale_whose_output_overflows() {
        let src = PixelBuffer::new(4, 4);
        let err = resize(&src, 1e300, Interpolation::Nearest).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { .. }), "{err}");
        assert_eq!(checked_area(3, 5), Ok(15));
    }

    #[test]
    fn nearest_doubles_pixels() {
        let src = PixelBuffer::from_fn(2, 1, |x, _| [x as u8 * 100, 0, 0, 255]);
        let out = resize(&src, 2.0, Interpolation::Nearest).unwrap();
        assert_eq!((out.width(), out.height()), (4, 2));
        let reds: Vec<u8> = out.row(1).iter().map(|p| p[0]).collect();
        assert_eq!(reds, vec![0, 0, 100, 100]);
    }

    #[test]
    fn cancelled_resize_reports_cancelled() {
        let src = PixelBuffer::new(8, 8);
        let token = CancelToken::new();
        token.cancel();
        assert_eq!(
            resize_with_cancel(&src, 2.0, Interpolation::Bicubic, &token),
            Err(EngineError::Cancelled)
        );
    }
}
