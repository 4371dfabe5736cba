//! Region feature table and its delimited-text export.
use super::stats::RegionStats;
use crate::image::rgba::round_half_up;
use serde::Serialize;

pub const CSV_HEADER: &str = "ID,Center,Width,Height,Diagonal,Energy,Entropy,Mean,Median";

/// A region with its 1-based table id.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRecord {
    pub id: usize,
    #[serde(flatten)]
    pub stats: RegionStats,
}

impl RegionRecord {
    /// One CSV row. `Center` is quoted because it contains the delimiter.
    pub fn csv_row(&self) -> String {
        let s = &self.stats;
        format!(
            "{},\"{},{}\",{},{},{},{:.3},{:.2},{},{}",
            self.id,
            s.center.0,
            s.center.1,
            s.width,
            s.height,
            s.diagonal,
            s.energy,
            s.entropy,
            round_half_up(s.mean),
            round_half_up(s.median),
        )
    }
}

/// Number regions from 1 in the given order.
pub fn number_regions(stats: impl IntoIterator<Item = RegionStats>) -> Vec<RegionRecord> {
    stats
        .into_iter()
        .enumerate()
        .map(|(i, stats)| RegionRecord { id: i + 1, stats })
        .collect()
}

/// Header line followed by one row per record, joined with `\n`.
pub fn to_csv(records: &[RegionRecord]) -> String {
    std::iter::once(CSV_HEADER.to_string())
        .chain(records.iter().map(RegionRecord::csv_row))
        .collect::<Vec<_>>()
        .join("\n")
}
