//! Hough-transform feature voting over binary edge masks.
//!
//! - [`lines`]: `(θ, ρ)` voting with 1° angle bins, threshold-only extraction.
//! - [`circles`]: `(a, b, r)` centre voting with greedy separation filtering.
//!
//! Voting runs in parallel over mask rows; each worker fills its own sparse
//! [`Accumulator`] and partial results are merged additively, so the vote
//! counts never depend on scheduling.

pub mod accumulator;
pub mod circles;
pub mod lines;

pub use accumulator::Accumulator;
pub use circles::{CircleBin, CircleFeature, CircleParams, HoughCircleDetector};
pub use lines::{HoughLineDetector, LineBin, LineFeature, LineParams};
