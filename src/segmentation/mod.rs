//! Segmentation pipeline: classify pixels, label 4-connected regions and
//! describe each region.
//!
//! ```text
//! PixelBuffer ──classify──▶ Mask ──label──▶ [Component] ──stats──▶ [RegionRecord]
//! ```

pub mod classify;
pub mod labeling;
pub mod report;
pub mod stats;

pub use classify::{classify, PixelClassifier, VegetationClassifier};
pub use labeling::{Component, ConnectedComponentLabeler};
pub use report::{number_regions, to_csv, RegionRecord, CSV_HEADER};
pub use stats::{BoundingBox, RegionStats};

use crate::image::{Mask, PixelBuffer};

/// Output of [`segment_regions`].
#[derive(Clone, Debug)]
pub struct Segmentation {
    pub mask: Mask,
    pub components: Vec<Component>,
    pub regions: Vec<RegionRecord>,
}

/// Run the full segmentation pipeline on `buffer`.
pub fn segment_regions<C: PixelClassifier + ?Sized>(
    buffer: &PixelBuffer,
    classifier: &C,
) -> Segmentation {
    let mask = classify(buffer, classifier);
    let components = ConnectedComponentLabeler::new().label(&mask);
    let regions = number_regions(
        components
            .iter()
            .filter_map(|c| RegionStats::compute(c, buffer)),
    );
    Segmentation {
        mask,
        components,
        regions,
    }
}
