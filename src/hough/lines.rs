//! Straight-line Hough transform over an edge mask.
//!
//! A line is parameterized by `(θ, ρ)` with `θ ∈ [0°, 180°)` in 1° steps and
//! `ρ = round(x·cosθ + y·sinθ)`. Every edge pixel votes once per angle.
//!
//! All bins above the vote threshold are reported. There is no peak merging
//! or non-maximum suppression, so neighbouring bins belonging to the same
//! physical line may each be returned.
use super::accumulator::Accumulator;
use crate::cancel::CancelToken;
use crate::error::{EngineError, Result};
use crate::image::rgba::round_half_up;
use crate::image::{EdgeMask, ImageView};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Number of 1° angle bins covering [0°, 180°).
pub const ANGLE_BINS: u16 = 180;
/// Half-length of the drawn segment along the line direction.
pub const SEGMENT_HALF_LENGTH: f64 = 1000.0;
pub const DEFAULT_LINE_VOTE_THRESHOLD: u32 = 100;

/// Accumulator key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineBin {
    pub angle_deg: u16,
    pub radius: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineFeature {
    pub angle_deg: u16,
    pub radius: i32,
    pub votes: u32,
}

impl LineFeature {
    /// Endpoints of the segment through the foot point `(ρ cosθ, ρ sinθ)`,
    /// extended ±[`SEGMENT_HALF_LENGTH`] along the line.
    pub fn segment(&self) -> ([i32; 2], [i32; 2]) {
        let theta = (self.angle_deg as f64).to_radians();
        let (sin, cos) = theta.sin_cos();
        let r = self.radius as f64;
        let (fx, fy) = (r * cos, r * sin);
        let l = SEGMENT_HALF_LENGTH;
        let start = [
            round_half_up(fx - l * sin) as i32,
            round_half_up(fy + l * cos) as i32,
        ];
        let end = [
            round_half_up(fx + l * sin) as i32,
            round_half_up(fy - l * cos) as i32,
        ];
        (start, end)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineParams {
    /// A bin is reported when its votes are strictly above this value.
    pub vote_threshold: u32,
}

impl Default for LineParams {
    fn default() -> Self {
        Self {
            vote_threshold: DEFAULT_LINE_VOTE_THRESHOLD,
        }
    }
}

/// Precomputed `(cosθ, sinθ)` for every angle bin.
fn trig_table() -> Vec<(f64, f64)> {
    (0..ANGLE_BINS)
        .map(|deg| {
            let (sin, cos) = (deg as f64).to_radians().sin_cos();
            (cos, sin)
        })
        .collect()
}

#[derive(Clone, Debug, Default)]
pub struct HoughLineDetector {
    params: LineParams,
}

impl HoughLineDetector {
    pub fn new(params: LineParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LineParams {
        &self.params
    }

    /// Full vote accumulator for `mask`.
    pub fn accumulate(&self, mask: &EdgeMask) -> Accumulator<LineBin> {
        self.accumulate_inner(mask, None).unwrap_or_default()
    }

    fn accumulate_inner(
        &self,
        mask: &EdgeMask,
        cancel: Option<&CancelToken>,
    ) -> Option<Accumulator<LineBin>> {
        let table = trig_table();
        let acc = (0..mask.height())
            .into_par_iter()
            .fold(Accumulator::new, |mut acc, y| {
                if cancel.is_some_and(|c| c.is_cancelled()) {
                    return acc;
                }
                for (x, &v) in mask.row(y).iter().enumerate() {
                    if v == 0 {
                        continue;
                    }
                    let (xf, yf) = (x as f64, y as f64);
                    for (deg, &(cos, sin)) in table.iter().enumerate() {
                        acc.vote(LineBin {
                            angle_deg: deg as u16,
                            radius: round_half_up(xf * cos + yf * sin) as i32,
                        });
                    }
                }
                acc
            })
            .reduce(Accumulator::new, Accumulator::merge);
        match cancel {
            Some(c) if c.is_cancelled() => None,
            _ => Some(acc),
        }
    }

    /// Every `(θ, ρ)` bin with more votes than the threshold, sorted by
    /// `(angle, radius)`.
    pub fn detect(&self, mask: &EdgeMask) -> Vec<LineFeature> {
        let acc = self.accumulate(mask);
        self.extract(&acc)
    }

    pub fn detect_with_cancel(
        &self,
        mask: &EdgeMask,
        cancel: &CancelToken,
    ) -> Result<Vec<LineFeature>> {
        let acc = self
            .accumulate_inner(mask, Some(cancel))
            .ok_or(EngineError::Cancelled)?;
        Ok(self.extract(&acc))
    }

    fn extract(&self, acc: &Accumulator<LineBin>) -> Vec<LineFeature> {
        let mut lines: Vec<LineFeature> = acc
            .above(self.params.vote_threshold)
            .map(|(bin, votes)| LineFeature {
                angle_deg: bin.angle_deg,
                radius: bin.radius,
                votes,
            })
            .collect();
        lines.sort_by_key(|l| (l.angle_deg, l.radius));
        debug!(
            "HoughLineDetector: bins={} threshold={} lines={}",
            acc.len(),
            self.params.vote_threshold,
            lines.len()
        );
        lines
    }
}
