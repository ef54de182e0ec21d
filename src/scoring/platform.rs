use crate::model::{Pillar, Tag};

/// Full match when the platform name sits inside the tag name; otherwise a
/// pillar default that never drops to zero.
pub fn platform_relevance(platform: &str, tag: &Tag) -> f64 {
    let platform = platform.trim().to_lowercase();
    if !platform.is_empty() && tag.name.to_lowercase().contains(&platform) {
        return 1.0;
    }

    match tag.pillar {
        Pillar::Influencer => 0.8,
        Pillar::Campaign => 0.7,
        Pillar::Product => 0.6,
        _ => 0.5,
    }
}
