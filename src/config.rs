//! Engine configuration, deserialized from camelCase JSON with every field
//! defaulted.
//!
//! ```json
//! {
//!   "edgeThreshold": 150,
//!   "lineVoteThreshold": 100,
//!   "scaleFactor": 2.0,
//!   "interpolationMethod": "bicubic",
//!   "contrastVariant": "standard",
//!   "rotationAngleDeg": 0.0
//! }
//! ```
//!
//! Circle detection parameters are fixed (see [`CircleParams`]) and not part
//! of this surface.
use crate::edges::{EdgeParams, DEFAULT_EDGE_THRESHOLD};
use crate::error::{EngineError, Result};
use crate::hough::lines::DEFAULT_LINE_VOTE_THRESHOLD;
use crate::hough::{CircleParams, LineParams};
use crate::resample::scale::validate_scale;
use crate::resample::Interpolation;
use crate::tone::ContrastCurve;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

pub const EDGE_THRESHOLD_RANGE: RangeInclusive<f32> = 50.0..=255.0;
pub const LINE_VOTE_THRESHOLD_RANGE: RangeInclusive<u32> = 50..=200;
pub const DEFAULT_SCALE_FACTOR: f64 = 2.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub edge_threshold: f32,
    pub line_vote_threshold: u32,
    pub scale_factor: f64,
    pub interpolation_method: Interpolation,
    pub contrast_variant: ContrastCurve,
    pub rotation_angle_deg: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            line_vote_threshold: DEFAULT_LINE_VOTE_THRESHOLD,
            scale_factor: DEFAULT_SCALE_FACTOR,
            interpolation_method: Interpolation::default(),
            contrast_variant: ContrastCurve::default(),
            rotation_angle_deg: 0.0,
        }
    }
}

impl EngineConfig {
    /// Check every field against its accepted range.
    pub fn validate(&self) -> Result<()> {
        if !EDGE_THRESHOLD_RANGE.contains(&self.edge_threshold) {
            return Err(EngineError::invalid_parameter(
                "edgeThreshold",
                format!("must be within 50..=255, got {}", self.edge_threshold),
            ));
        }
        if !LINE_VOTE_THRESHOLD_RANGE.contains(&self.line_vote_threshold) {
            return Err(EngineError::invalid_parameter(
                "lineVoteThreshold",
                format!("must be within 50..=200, got {}", self.line_vote_threshold),
            ));
        }
        validate_scale(self.scale_factor)?;
        if !self.rotation_angle_deg.is_finite() {
            return Err(EngineError::invalid_parameter(
                "rotationAngleDeg",
                format!("must be finite, got {}", self.rotation_angle_deg),
            ));
        }
        Ok(())
    }

    pub fn edge_params(&self) -> EdgeParams {
        EdgeParams {
            threshold: self.edge_threshold,
        }
    }

    pub fn line_params(&self) -> LineParams {
        LineParams {
            vote_threshold: self.line_vote_threshold,
        }
    }

    pub fn circle_params(&self) -> CircleParams {
        CircleParams::default()
    }
}

/// Read and validate an [`EngineConfig`] from a JSON file.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let load_error = |reason: String| EngineError::Load {
        path: path.display().to_string(),
        reason,
    };
    let data = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
    let config = parse_config(&data).map_err(|e| match e {
        EngineError::InvalidParameter { .. } => e,
        other => load_error(other.to_string()),
    })?;
    Ok(config)
}

/// Parse and validate an [`EngineConfig`] from JSON text.
pub fn parse_config(json: &str) -> Result<EngineConfig> {
    let config: EngineConfig = serde_json::from_str(json).map_err(|e| EngineError::Load {
        path: "<inline>".to_string(),
        reason: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}
