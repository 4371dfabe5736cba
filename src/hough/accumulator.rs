use std::collections::HashMap;
use std::hash::Hash;

/// Sparse vote counter over a discretized parameter space.
///
/// Keys are small `Copy` tuple structs; iteration order is unspecified, so
/// callers sort extracted features when they need a stable order.
#[derive(Clone, Debug)]
pub struct Accumulator<K> {
    votes: HashMap<K, u32>,
}

impl<K> Default for Accumulator<K> {
    fn default() -> Self {
        Self {
            votes: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> Accumulator<K> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn vote(&mut self, key: K) {
        *self.votes.entry(key).or_insert(0) += 1;
    }

    pub fn votes(&self, key: &K) -> u32 {
        self.votes.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Additive merge; the result does not depend on merge order.
    pub fn merge(mut self, other: Self) -> Self {
        let (mut big, small) = if self.votes.len() >= other.votes.len() {
            (std::mem::take(&mut self.votes), other.votes)
        } else {
            (other.votes, std::mem::take(&mut self.votes))
        };
        for (key, count) in small {
            *big.entry(key).or_insert(0) += count;
        }
        Self { votes: big }
    }

    /// Entries with strictly more than `threshold` votes.
    pub fn above(&self, threshold: u32) -> impl Iterator<Item = (K, u32)> + '_ {
        self.votes
            .iter()
            .filter(move |&(_, &count)| count > threshold)
            .map(|(&key, &count)| (key, count))
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, u32)> + '_ {
        self.votes.iter().map(|(&key, &count)| (key, count))
    }
}
