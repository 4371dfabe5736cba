//! Single-pass connected-component labeling with equivalence resolution.
//!
//! The raster scan looks only at the left and upper neighbours, so regions are
//! 4-connected; diagonal contact never merges two regions. When both
//! neighbours carry distinct labels the pair is recorded as equivalent, and a
//! resolution pass maps each equivalence class to its smallest label.
//!
//! This is a simplified union-merge rather than a union-find with path
//! compression; correctness only depends on scan order and 4-connectivity.
use crate::image::{ImageView, Mask};
use std::collections::BTreeMap;

/// One connected foreground region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    /// Resolved label (smallest provisional label of the region).
    pub label: u32,
    /// Member coordinates `(x, y)` in raster order.
    pub pixels: Vec<(u32, u32)>,
}

impl Component {
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ConnectedComponentLabeler;

impl ConnectedComponentLabeler {
    pub fn new() -> Self {
        Self
    }

    /// Components of `mask`, ordered by ascending resolved label.
    pub fn label(&self, mask: &Mask) -> Vec<Component> {
        let (labels, equivalences, next_label) = first_pass(mask);
        let resolved = resolve(&equivalences, next_label);

        let w = mask.width();
        let mut groups: BTreeMap<u32, Vec<(u32, u32)>> = BTreeMap::new();
        for (idx, &provisional) in labels.iter().enumerate() {
            if provisional == 0 {
                continue;
            }
            let label = resolved[provisional as usize];
            groups
                .entry(label)
                .or_default()
                .push(((idx % w) as u32, (idx / w) as u32));
        }
        log::debug!(
            "ConnectedComponentLabeler: provisional={} equivalences={} components={}",
            next_label - 1,
            equivalences.len(),
            groups.len()
        );
        groups
            .into_iter()
            .map(|(label, pixels)| Component { label, pixels })
            .collect()
    }
}

/// Raster scan assigning provisional labels (1-based, 0 = background).
/// Returns the label plane, the recorded `(min, other)` equivalence pairs and
/// the next unused label.
fn first_pass(mask: &Mask) -> (Vec<u32>, Vec<(u32, u32)>, u32) {
    let w = mask.width();
    let h = mask.height();
    let mut labels = vec![0u32; w * h];
    let mut equivalences = Vec::new();
    let mut next_label = 1u32;

    for y in 0..h {
        let row = mask.row(y);
        for x in 0..w {
            if row[x] == 0 {
                continue;
            }
            let idx = y * w + x;
            let left = if x > 0 { labels[idx - 1] } else { 0 };
            let up = if y > 0 { labels[idx - w] } else { 0 };
            labels[idx] = match (left, up) {
                (0, 0) => {
                    let fresh = next_label;
                    next_label += 1;
                    fresh
                }
                (l, 0) => l,
                (0, u) => u,
                (l, u) => {
                    let min = l.min(u);
                    if l != u {
                        equivalences.push((min, l.max(u)));
                    }
                    min
                }
            };
        }
    }
    (labels, equivalences, next_label)
}

/// Map every provisional label to the minimum label of its equivalence class.
fn resolve(equivalences: &[(u32, u32)], next_label: u32) -> Vec<u32> {
    let n = next_label as usize;
    let mut adjacency: Vec<Vec<u32>> = vec![Vec::new(); n];
    for &(a, b) in equivalences {
        adjacency[a as usize].push(b);
        adjacency[b as usize].push(a);
    }

    let mut resolved: Vec<u32> = (0..next_label).collect();
    let mut visited = vec![false; n];
    let mut stack = Vec::new();
    // Ascending visit order makes the first label of each class its minimum.
    for start in 1..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        stack.push(start);
        while let Some(cur) = stack.pop() {
            resolved[cur] = start as u32;
            for &next in &adjacency[cur] {
                let next = next as usize;
                if !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }
    }
    resolved
}
