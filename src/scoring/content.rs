use crate::model::{Pillar, Tag};

/// Pillar-specific floors applied when the post mentions one of the keywords.
const KEYWORD_FLOORS: &[(Pillar, &[&str], f64)] = &[
    (Pillar::Product, &["wear", "outfit", "fashion"], 0.6),
    (Pillar::Influencer, &["collab", "partnership"], 0.5),
];

/// Lexical overlap between post text and a tag name, in `[0, 1]`.
///
/// A full-phrase hit scores 1.0. Otherwise the score is the share of the tag's
/// words (only words longer than two characters can match) found as substrings
/// of the content, lifted to a pillar floor when the content carries one of
/// that pillar's keywords.
pub fn content_similarity(content: &str, tag: &Tag) -> f64 {
    let content = content.to_lowercase();
    let name = tag.name.trim().to_lowercase();
    if name.is_empty() {
        return 0.0;
    }

    if content.contains(&name) {
        return 1.0;
    }

    let words: Vec<&str> = name
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|word| !word.is_empty())
        .collect();
    let matched = words
        .iter()
        .filter(|word| word.chars().count() > 2 && content.contains(*word))
        .count();
    let mut score = if words.is_empty() {
        0.0
    } else {
        matched as f64 / words.len() as f64
    };

    for (pillar, keywords, floor) in KEYWORD_FLOORS {
        if tag.pillar == *pillar && keywords.iter().any(|keyword| content.contains(keyword)) {
            score = score.max(*floor);
        }
    }

    score.clamp(0.0, 1.0)
}
