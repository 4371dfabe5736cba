//! Sigmoid contrast curves applied per colour channel through a lookup
//! table.
use crate::error::EngineError;
use crate::image::rgba::clamp_trunc_u8;
use crate::image::PixelBuffer;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[inline]
fn logistic(t: f64) -> f64 {
    1.0 / (1.0 + (-t).exp())
}

/// Contrast curve family. Each maps a normalised channel value `v ∈ [0, 1]`
/// to `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastCurve {
    /// `1 / (1 + e^-v)`
    #[default]
    Standard,
    /// `1 / (1 + e^-10(v - 0.5))`
    Shifted,
    /// `1 / (1 + e^-5v)`
    Sloped,
    /// Product of the shifted curve and `1 / (1 + e^-10(v + 0.5))`.
    Custom,
}

impl ContrastCurve {
    pub const ALL: [ContrastCurve; 4] = [
        ContrastCurve::Standard,
        ContrastCurve::Shifted,
        ContrastCurve::Sloped,
        ContrastCurve::Custom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ContrastCurve::Standard => "standard",
            ContrastCurve::Shifted => "shifted",
            ContrastCurve::Sloped => "sloped",
            ContrastCurve::Custom => "custom",
        }
    }

    /// Evaluate the curve at `v`.
    pub fn eval(self, v: f64) -> f64 {
        match self {
            ContrastCurve::Standard => logistic(v),
            ContrastCurve::Shifted => logistic(10.0 * (v - 0.5)),
            ContrastCurve::Sloped => logistic(5.0 * v),
            ContrastCurve::Custom => logistic(10.0 * (v - 0.5)) * logistic(10.0 * (v + 0.5)),
        }
    }
}

impl FromStr for ContrastCurve {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContrastCurve::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                EngineError::invalid_parameter(
                    "contrastVariant",
                    format!("unknown variant `{s}` (standard, shifted, sloped, custom)"),
                )
            })
    }
}

impl std::fmt::Display for ContrastCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Remaps R, G and B through a precomputed curve; alpha is left alone.
#[derive(Clone, Debug)]
pub struct ContrastCurveMapper {
    curve: ContrastCurve,
    lut: [u8; 256],
}

impl ContrastCurveMapper {
    pub fn new(curve: ContrastCurve) -> Self {
        let mut lut = [0u8; 256];
        for (c, out) in lut.iter_mut().enumerate() {
            *out = clamp_trunc_u8(curve.eval(c as f64 / 255.0) * 255.0);
        }
        Self { curve, lut }
    }

    pub fn curve(&self) -> ContrastCurve {
        self.curve
    }

    #[inline]
    pub fn map_value(&self, c: u8) -> u8 {
        self.lut[c as usize]
    }

    pub fn apply_in_place(&self, buffer: &mut PixelBuffer) {
        buffer.pixels_mut().par_iter_mut().for_each(|px| {
            for c in &mut px[..3] {
                *c = self.lut[*c as usize];
            }
        });
    }

    pub fn apply(&self, buffer: &PixelBuffer) -> PixelBuffer {
        let mut out = buffer.clone();
        self.apply_in_place(&mut out);
        out
    }
}

impl Default for ContrastCurveMapper {
    fn default() -> Self {
        Self::new(ContrastCurve::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_curve_is_monotone() {
        let m = ContrastCurveMapper::new(ContrastCurve::Standard);
        for c in 1..=255u8 {
            assert!(m.map_value(c) >= m.map_value(c - 1), "at {c}");
        }
        // 1 / (1 + e^0) = 0.5 -> 127.5 truncated.
        assert_eq!(m.map_value(0), 127);
        // 1 / (1 + e^-1) = 0.731... -> 186.4 truncated.
        assert_eq!(m.map_value(255), 186);
    }

    #[test]
    fn shifted_curve_is_centred() {
        let m = ContrastCurveMapper::new(ContrastCurve::Shifted);
        // e^-5 tails: 0.0067 * 255 and 0.9933 * 255.
        assert_eq!(m.map_value(0), 1);
        assert_eq!(m.map_value(255), 253);
        assert_eq!(m.map_value(128), 128);
    }

    #[test]
    fn alpha_untouched() {
        let src = PixelBuffer::filled(3, 2, [10, 200, 90, 17]);
        for curve in ContrastCurve::ALL {
            let out = ContrastCurveMapper::new(curve).apply(&src);
            assert!(out.pixels().iter().all(|p| p[3] == 17), "{curve}");
        }
    }

    #[test]
    fn parse_variant_names() {
        assert_eq!("SLOPED".parse::<ContrastCurve>().unwrap(), ContrastCurve::Sloped);
        assert!("gamma".parse::<ContrastCurve>().is_err());
    }
}
