//! Maps free-text category names onto a [`Pillar`].
//!
//! Rules are evaluated in order and the first match wins, so more specific
//! keywords sit above looser ones ("campaign" must be tested before the `ai`
//! token rule would ever see it).

use crate::model::Pillar;

#[derive(Debug, Clone, Copy)]
enum Matcher {
    /// Substring anywhere in the lowercased name.
    Contains(&'static [&'static str]),
    /// Whole token after splitting on non-alphanumerics.
    Token(&'static [&'static str]),
}

impl Matcher {
    fn matches(self, lowered: &str, tokens: &[&str]) -> bool {
        match self {
            Matcher::Contains(needles) => needles.iter().any(|needle| lowered.contains(needle)),
            Matcher::Token(words) => tokens.iter().any(|token| words.contains(token)),
        }
    }
}

const RULES: &[(Matcher, Pillar)] = &[
    (
        Matcher::Contains(&["influencer", "creator", "ambassador", "kol"]),
        Pillar::Influencer,
    ),
    (Matcher::Contains(&["campaign", "launch"]), Pillar::Campaign),
    (
        Matcher::Contains(&["product", "collection", "sku", "merch", "apparel"]),
        Pillar::Product,
    ),
    (Matcher::Token(&["ad", "ads", "paid", "sponsored"]), Pillar::Ad),
    (Matcher::Contains(&["advert", "creative"]), Pillar::Ad),
    (Matcher::Token(&["ai", "ml", "llm"]), Pillar::Ai),
    (Matcher::Contains(&["generated", "machine"]), Pillar::Ai),
    (Matcher::Contains(&["post", "content", "format", "caption"]), Pillar::Post),
];

/// First matching rule decides; unknown names fall back to [`Pillar::Other`].
pub fn classify_pillar(category_name: &str) -> Pillar {
    let lowered = category_name.trim().to_lowercase();
    if lowered.is_empty() {
        return Pillar::Other;
    }
    let tokens: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .collect();

    RULES
        .iter()
        .find(|(matcher, _)| matcher.matches(&lowered, &tokens))
        .map(|(_, pillar)| *pillar)
        .unwrap_or(Pillar::Other)
}
