//! Owned RGBA raster: the input and output of every pipeline.
//!
//! Pixels are stored row-major as `[R, G, B, A]` tuples. The channel order is
//! fixed; filters leave alpha alone unless their docs say otherwise.
use crate::error::{EngineError, Result};
use crate::image::traits::{ImageView, ImageViewMut};

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 4;

pub type Rgba = [u8; CHANNELS];

/// Fully transparent black, used for canvas area not covered by a source.
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    /// Transparent buffer of size `width × height`.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, TRANSPARENT)
    }

    /// Buffer with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// Wrap interleaved RGBA bytes. Fails when `bytes.len() != width * height * 4`.
    pub fn from_raw(width: usize, height: usize, bytes: Vec<u8>) -> Result<Self> {
        let expected = width.checked_mul(height).and_then(|n| n.checked_mul(CHANNELS));
        if expected != Some(bytes.len()) {
            return Err(EngineError::InvalidBuffer {
                width,
                height,
                expected: expected.unwrap_or(usize::MAX),
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(CHANNELS)
            .map(|c| [c[0], c[1], c[2], c[3]])
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from a per-pixel generator, row-major.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Rgba) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Interleaved RGBA bytes, row-major.
    pub fn to_raw(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.pixels.into_iter().flatten().collect()
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// `true` when every pixel equals the first one.
    pub fn is_uniform(&self) -> bool {
        match self.pixels.first() {
            Some(first) => self.pixels.iter().all(|p| p == first),
            None => true,
        }
    }
}

impl ImageView for PixelBuffer {
    type Pixel = Rgba;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn row(&self, y: usize) -> &[Rgba] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }
}

impl ImageViewMut for PixelBuffer {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [Rgba] {
        let start = y * self.width;
        &mut self.pixels[start..start + self.width]
    }
}

/// Store an interpolated channel value the way a clamped byte array does:
/// clamp to [0, 255] and round half to even. NaN stores as 0.
#[inline]
pub fn clamp_round_u8(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0).round_ties_even() as u8
}

/// Clamp to [0, 255] and drop the fractional part.
#[inline]
pub fn clamp_trunc_u8(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0) as u8
}

/// JavaScript-style `Math.round`: halves round toward positive infinity.
#[inline]
pub fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_length_mismatch() {
        let err = PixelBuffer::from_raw(3, 2, vec![0; 23]).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidBuffer {
                width: 3,
                height: 2,
                expected: 24,
                actual: 23
            }
        );
    }

    #[test]
    fn from_raw_rejects_overflowing_dimensions() {
        let err = PixelBuffer::from_raw(usize::MAX, 2, vec![0; 8]).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidBuffer {
                width: usize::MAX,
                height: 2,
                expected: usize::MAX,
                actual: 8
            }
        );
    }

    #[test]
    fn raw_bytes_keep_channel_order() {
        let bytes: Vec<u8> = (0..16).collect();
        let buf = PixelBuffer::from_raw(2, 2, bytes.clone()).unwrap();
        assert_eq!(buf.get(1, 0), [4, 5, 6, 7]);
        assert_eq!(buf.get(0, 1), [8, 9, 10, 11]);
        assert_eq!(buf.into_raw(), bytes);
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(clamp_round_u8(127.5), 128);
        assert_eq!(clamp_round_u8(126.5), 126);
        assert_eq!(clamp_round_u8(-3.0), 0);
        assert_eq!(clamp_round_u8(300.0), 255);
        assert_eq!(clamp_trunc_u8(127.9), 127);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(2.5), 3);
    }
}
