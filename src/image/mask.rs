//! Binary mask: one byte per pixel, `0` (background) or `255` (foreground).
//!
//! Serves as both the edge mask produced by the Sobel stage and the
//! classification mask consumed by the component labeler.
use crate::error::{EngineError, Result};
use crate::image::traits::{ImageView, ImageViewMut};

pub const MASK_ON: u8 = 255;
pub const MASK_OFF: u8 = 0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

/// Mask produced by edge detection.
pub type EdgeMask = Mask;

impl Mask {
    /// All-background mask.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![MASK_OFF; width * height],
        }
    }

    /// Wrap raw bytes; any non-zero byte is stored as [`MASK_ON`].
    pub fn from_raw(width: usize, height: usize, mut data: Vec<u8>) -> Result<Self> {
        let expected = width * height;
        if data.len() != expected {
            return Err(EngineError::InvalidBuffer {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        for v in &mut data {
            if *v != MASK_OFF {
                *v = MASK_ON;
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if f(x, y) {
                    mask.data[y * width + x] = MASK_ON;
                }
            }
        }
        mask
    }

    #[inline]
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.data[y * self.width + x] == MASK_ON
    }

    #[inline]
    pub fn mark(&mut self, x: usize, y: usize, on: bool) {
        self.data[y * self.width + x] = if on { MASK_ON } else { MASK_OFF };
    }

    /// Number of foreground pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v == MASK_ON).count()
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Foreground coordinates in raster order.
    pub fn foreground(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == MASK_ON)
            .map(move |(i, _)| (i % w, i / w))
    }
}

impl ImageView for Mask {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
}

impl ImageViewMut for Mask {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_normalises_foreground() {
        let mask = Mask::from_raw(2, 2, vec![0, 1, 255, 0]).unwrap();
        assert_eq!(mask.as_raw(), &[0, 255, 255, 0]);
        assert_eq!(mask.count(), 2);
        let fg: Vec<_> = mask.foreground().collect();
        assert_eq!(fg, vec![(1, 0), (0, 1)]);
    }

    #[test]
    fn from_raw_rejects_short_data() {
        assert!(matches!(
            Mask::from_raw(4, 4, vec![0; 15]),
            Err(EngineError::InvalidBuffer { expected: 16, .. })
        ));
    }
}
