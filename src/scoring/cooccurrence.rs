use std::collections::HashMap;

use crate::model::{CoOccurrencePair, Tag, TagId};

/// Normalising divisor: ten shared posts saturate the signal.
const SATURATION: f64 = 10.0;

/// Symmetric pair → frequency lookup, built once per recommendation request.
#[derive(Debug, Clone, Default)]
pub struct CoOccurrenceIndex {
    pairs: HashMap<(TagId, TagId), u64>,
}

impl CoOccurrenceIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Pairs seen fewer than `min_frequency` times are left out of the index.
    pub fn from_pairs(pairs: &[CoOccurrencePair], min_frequency: u64) -> Self {
        let mut index = HashMap::with_capacity(pairs.len());
        for pair in pairs {
            if pair.tag_id1 == pair.tag_id2 || pair.frequency < min_frequency {
                continue;
            }
            *index.entry(key(pair.tag_id1, pair.tag_id2)).or_insert(0) += pair.frequency;
        }
        Self { pairs: index }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn frequency(&self, a: TagId, b: TagId) -> u64 {
        self.pairs.get(&key(a, b)).copied().unwrap_or(0)
    }

    /// `min(sum / 10, 1.0)` over the candidate's pairings with every current tag.
    pub fn score(&self, candidate: TagId, current_tags: &[Tag]) -> f64 {
        if current_tags.is_empty() {
            return 0.0;
        }
        let total: u64 = current_tags
            .iter()
            .map(|tag| self.frequency(candidate, tag.id))
            .sum();
        (total as f64 / SATURATION).min(1.0)
    }
}

fn key(a: TagId, b: TagId) -> (TagId, TagId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
