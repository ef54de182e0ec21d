use std::collections::HashMap;

use crate::model::{Pillar, Tag};

pub const FIRST_TAG_SCORE: f64 = 0.5;
pub const NEW_PILLAR_SCORE: f64 = 0.8;
pub const UNDER_REPRESENTED_SCORE: f64 = 0.6;
pub const SATURATED_SCORE: f64 = 0.3;

/// Pillar tally of the tags already on a post.
#[derive(Debug, Clone, Default)]
pub struct PillarBalance {
    counts: HashMap<Pillar, usize>,
    max_count: usize,
}

impl PillarBalance {
    pub fn new(current_tags: &[Tag]) -> Self {
        let mut counts: HashMap<Pillar, usize> = HashMap::new();
        for tag in current_tags {
            *counts.entry(tag.pillar).or_insert(0) += 1;
        }
        let max_count = counts.values().copied().max().unwrap_or(0);
        Self { counts, max_count }
    }

    pub fn count(&self, pillar: Pillar) -> usize {
        self.counts.get(&pillar).copied().unwrap_or(0)
    }

    /// Rewards pillars the post lacks and discourages piling onto the dominant one.
    pub fn score(&self, pillar: Pillar) -> f64 {
        if self.counts.is_empty() {
            return FIRST_TAG_SCORE;
        }
        let current = self.count(pillar);
        if current == 0 {
            NEW_PILLAR_SCORE
        } else if current < self.max_count {
            UNDER_REPRESENTED_SCORE
        } else {
            SATURATED_SCORE
        }
    }
}
