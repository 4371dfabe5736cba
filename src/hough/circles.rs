//! Circular Hough transform with greedy separation filtering.
//!
//! Every edge pixel votes, for each radius in `[min_radius, max_radius]` and
//! each angle step, for the candidate centre
//! `(a, b) = (round(x − r·cosθ), round(y − r·sinθ))` when it lies inside the
//! image. Bins above the vote threshold are ranked by votes (ties broken by
//! ascending `(x, y, r)`), then accepted greedily while their centre is farther
//! than `min_separation` from every centre already accepted.
use super::accumulator::Accumulator;
use crate::cancel::CancelToken;
use crate::error::{EngineError, Result};
use crate::image::rgba::round_half_up;
use crate::image::{EdgeMask, ImageView};
use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Accumulator key: candidate centre and radius.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CircleBin {
    pub x: i32,
    pub y: i32,
    pub radius: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleFeature {
    pub x: i32,
    pub y: i32,
    pub radius: u32,
    /// Vote count of the accepted bin.
    pub confidence: u32,
}

/// Detection parameters. The defaults are the fixed values used for
/// eye-sized circular features.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CircleParams {
    pub min_radius: u32,
    pub max_radius: u32,
    pub angle_step_deg: f64,
    /// A bin qualifies when its votes are strictly above this value.
    pub vote_threshold: u32,
    /// Accepted centres must be strictly farther apart than this (pixels).
    pub min_separation: f64,
    pub max_features: usize,
}

impl Default for CircleParams {
    fn default() -> Self {
        Self {
            min_radius: 12,
            max_radius: 42,
            angle_step_deg: 2.5,
            vote_threshold: 28,
            min_separation: 55.0,
            max_features: 2,
        }
    }
}

impl CircleParams {
    /// `(cosθ, sinθ)` for `θ = k·step`, `θ < 360°`.
    fn trig_table(&self) -> Vec<(f64, f64)> {
        if !(self.angle_step_deg > 0.0) {
            return Vec::new();
        }
        let steps = (360.0 / self.angle_step_deg).ceil() as usize;
        (0..steps)
            .map(|k| k as f64 * self.angle_step_deg)
            .filter(|&deg| deg < 360.0)
            .map(|deg| {
                let (sin, cos) = deg.to_radians().sin_cos();
                (cos, sin)
            })
            .collect()
    }
}

#[derive(Clone, Debug, Default)]
pub struct HoughCircleDetector {
    params: CircleParams,
}

impl HoughCircleDetector {
    pub fn new(params: CircleParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CircleParams {
        &self.params
    }

    pub fn accumulate(&self, mask: &EdgeMask) -> Accumulator<CircleBin> {
        self.accumulate_inner(mask, None).unwrap_or_default()
    }

    fn accumulate_inner(
        &self,
        mask: &EdgeMask,
        cancel: Option<&CancelToken>,
    ) -> Option<Accumulator<CircleBin>> {
        let p = &self.params;
        let table = p.trig_table();
        let (w, h) = (mask.width() as i64, mask.height() as i64);
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
                    for r in p.min_radius..=p.max_radius {
                        let rf = r as f64;
                        for &(cos, sin) in &table {
                            let a = round_half_up(xf - rf * cos);
                            let b = round_half_up(yf - rf * sin);
                            if a >= 0 && a < w && b >= 0 && b < h {
                                acc.vote(CircleBin {
                                    x: a as i32,
                                    y: b as i32,
                                    radius: r,
                                });
                            }
                        }
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

    /// Up to `max_features` well-separated circles, strongest first.
    pub fn detect(&self, mask: &EdgeMask) -> Vec<CircleFeature> {
        if mask.count() == 0 {
            warn!("HoughCircleDetector: edge mask is empty");
            return Vec::new();
        }
        let acc = self.accumulate(mask);
        self.select(&acc)
    }

    pub fn detect_with_cancel(
        &self,
        mask: &EdgeMask,
        cancel: &CancelToken,
    ) -> Result<Vec<CircleFeature>> {
        let acc = self
            .accumulate_inner(mask, Some(cancel))
            .ok_or(EngineError::Cancelled)?;
        Ok(self.select(&acc))
    }

    /// Rank qualifying bins and apply the greedy separation filter.
    pub fn select(&self, acc: &Accumulator<CircleBin>) -> Vec<CircleFeature> {
        let mut candidates: Vec<(CircleBin, u32)> =
            acc.above(self.params.vote_threshold).collect();
        candidates.sort_by(|(ka, va), (kb, vb)| vb.cmp(va).then_with(|| ka.cmp(kb)));

        let mut accepted: Vec<CircleFeature> = Vec::with_capacity(self.params.max_features);
        for (bin, votes) in &candidates {
            if accepted.len() >= self.params.max_features {
                break;
            }
            let distinct = accepted.iter().all(|c| {
                let dx = (c.x - bin.x) as f64;
                let dy = (c.y - bin.y) as f64;
                dx.hypot(dy) > self.params.min_separation
            });
            if distinct {
                accepted.push(CircleFeature {
                    x: bin.x,
                    y: bin.y,
                    radius: bin.radius,
                    confidence: *votes,
                });
            }
        }
        debug!(
            "HoughCircleDetector: bins={} candidates={} accepted={}",
            acc.len(),
            candidates.len(),
            accepted.len()
        );
        accepted
    }
}
