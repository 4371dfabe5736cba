//! Stage timing attached to every engine report.
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Wall-clock time spent in one named pipeline stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Per-stage timings of one engine invocation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    pub fn stage(&self, label: &str) -> Option<&StageTiming> {
        self.stages.iter().find(|s| s.label == label)
    }

    /// Run `f`, record its duration under `label` and log it.
    pub fn time<T>(&mut self, label: &'static str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!("stage {label} took {elapsed_ms:.3} ms");
        self.push(label, elapsed_ms);
        out
    }

    /// Set `total_ms` from the start of the invocation.
    pub fn finish(&mut self, started: Instant) {
        self.total_ms = started.elapsed().as_secs_f64() * 1000.0;
    }
}
