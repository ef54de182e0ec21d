use std::fmt::Display;

use tracing::warn;

use crate::model::TagId;

/// Used when the usage count cannot be fetched.
pub const NEUTRAL_POPULARITY: f64 = 0.5;

/// Bucketed log-scale approximation of global usage.
pub fn popularity_score(usage_count: u64) -> f64 {
    match usage_count {
        0 => 0.1,
        1..=4 => 0.3,
        5..=19 => 0.5,
        20..=99 => 0.7,
        _ => 0.9,
    }
}

pub fn popularity_or_neutral<E: Display>(tag_id: TagId, lookup: Result<u64, E>) -> f64 {
    match lookup {
        Ok(count) => popularity_score(count),
        Err(err) => {
            warn!(tag_id, error = %err, "usage count lookup failed, using neutral popularity");
            NEUTRAL_POPULARITY
        }
    }
}
