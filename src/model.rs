use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::SignalBreakdown;

pub type TagId = i64;
pub type PostId = i64;

/// Coarse category bucket a tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pillar {
    Product,
    Influencer,
    Campaign,
    Ad,
    Ai,
    Post,
    #[serde(other)]
    Other,
}

impl Pillar {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "product" | "products" => Some(Pillar::Product),
            "influencer" | "influencers" => Some(Pillar::Influencer),
            "campaign" | "campaigns" => Some(Pillar::Campaign),
            "ad" | "ads" => Some(Pillar::Ad),
            "ai" => Some(Pillar::Ai),
            "post" | "posts" => Some(Pillar::Post),
            "other" => Some(Pillar::Other),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Pillar::Product => "product",
            Pillar::Influencer => "influencer",
            Pillar::Campaign => "campaign",
            Pillar::Ad => "ad",
            Pillar::Ai => "ai",
            Pillar::Post => "post",
            Pillar::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub code: String,
    pub pillar: Pillar,
    pub tag_type: Option<String>,
    pub category: Option<String>,
    pub ai_suggested: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Tag {
    pub fn new(id: TagId, name: &str, pillar: Pillar) -> Self {
        Self {
            id,
            name: name.to_string(),
            code: tag_code(name),
            pillar,
            tag_type: None,
            category: None,
            ai_suggested: false,
            created_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub content: String,
    pub platform: String,
    pub campaign: Option<String>,
    pub client: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    pub fn new(id: PostId, content: &str, platform: &str) -> Self {
        Self {
            id,
            content: content.to_string(),
            platform: platform.to_string(),
            campaign: None,
            client: None,
            created_at: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTag {
    pub post_id: PostId,
    pub tag_id: TagId,
}

/// Number of posts that carried both tags. Stored with `tag_id1 < tag_id2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoOccurrencePair {
    pub tag_id1: TagId,
    pub tag_id2: TagId,
    pub frequency: u64,
}

impl CoOccurrencePair {
    pub fn new(a: TagId, b: TagId, frequency: u64) -> Self {
        let (tag_id1, tag_id2) = if a <= b { (a, b) } else { (b, a) };
        Self {
            tag_id1,
            tag_id2,
            frequency,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub tag: Tag,
    pub score: f64,
    pub reasons: Vec<String>,
    pub signals: SignalBreakdown,
}

/// Machine-readable code derived from a display name: `"Summer Collection"` → `summer_collection`.
pub fn tag_code(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_code_collapses_separators() {
        assert_eq!(tag_code("Summer Collection"), "summer_collection");
        assert_eq!(tag_code("  UGC -- Creator  "), "ugc_creator");
        assert_eq!(tag_code(""), "");
    }

    #[test]
    fn pair_is_stored_in_ascending_order() {
        let pair = CoOccurrencePair::new(9, 3, 4);
        assert_eq!((pair.tag_id1, pair.tag_id2), (3, 9));
    }

    #[test]
    fn unknown_pillar_deserializes_as_other() {
        let pillar: Pillar = serde_json::from_str("\"seasonal\"").unwrap();
        assert_eq!(pillar, Pillar::Other);
    }
}
