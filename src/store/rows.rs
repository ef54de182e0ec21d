//! Normalization boundary between heterogeneous source rows and the canonical
//! [`Tag`]/[`Post`] types. Tags arrive from the production catalog and from the
//! writable scratch store; scratch ids are shifted by [`SCRATCH_ID_OFFSET`] so
//! both sources can share one id space.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{tag_code, Pillar, Post, PostId, PostTag, Tag, TagId};
use crate::pillar::classify_pillar;

pub const SCRATCH_ID_OFFSET: TagId = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagSource {
    #[default]
    Production,
    Scratch,
}

impl TagSource {
    /// Production ids must stay below the offset and scratch ids must be
    /// non-negative, otherwise the two ranges would overlap.
    pub fn canonical_id(self, raw_id: TagId) -> Result<TagId> {
        match self {
            TagSource::Production if raw_id >= SCRATCH_ID_OFFSET => bail!(
                "production tag id {raw_id} collides with the scratch id range (>= {SCRATCH_ID_OFFSET})"
            ),
            TagSource::Production => Ok(raw_id),
            TagSource::Scratch if raw_id < 0 => {
                bail!("scratch tag id {raw_id} would shift into the production id range")
            }
            TagSource::Scratch => match raw_id.checked_add(SCRATCH_ID_OFFSET) {
                Some(id) => Ok(id),
                None => bail!("scratch tag id {raw_id} overflows when shifted"),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTagRow {
    pub id: TagId,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub pillar: Option<String>,
    #[serde(default, alias = "type")]
    pub tag_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub ai_suggested: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: TagSource,
}

impl RawTagRow {
    /// An explicit pillar name wins; otherwise the category (then type) is classified.
    pub fn resolve_pillar(&self) -> Pillar {
        if let Some(pillar) = self.pillar.as_deref().and_then(Pillar::from_str) {
            return pillar;
        }
        let hint = self
            .category
            .as_deref()
            .or(self.tag_type.as_deref())
            .or(self.pillar.as_deref())
            .unwrap_or_default();
        classify_pillar(hint)
    }

    pub fn normalize(&self) -> Result<Tag> {
        let code = self
            .code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| tag_code(&self.name));
        Ok(Tag {
            id: self.source.canonical_id(self.id)?,
            name: self.name.trim().to_string(),
            code,
            pillar: self.resolve_pillar(),
            tag_type: self.tag_type.clone(),
            category: self.category.clone(),
            ai_suggested: self.ai_suggested,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPostRow {
    pub id: PostId,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub campaign: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl RawPostRow {
    /// Title and body are joined so both feed content matching.
    pub fn normalize(&self) -> Post {
        let content = [self.title.as_deref(), self.content.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Post {
            id: self.id,
            content,
            platform: self
                .platform
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_lowercase(),
            campaign: self.campaign.clone(),
            client: self.client.clone(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RawPostTagRow {
    pub post_id: PostId,
    pub tag_id: TagId,
    #[serde(default)]
    pub source: TagSource,
}

impl RawPostTagRow {
    pub fn normalize(&self) -> Result<PostTag> {
        Ok(PostTag {
            post_id: self.post_id,
            tag_id: self.source.canonical_id(self.tag_id)?,
        })
    }
}

/// Raw export of posts, tags and their associations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub posts: Vec<RawPostRow>,
    #[serde(default)]
    pub tags: Vec<RawTagRow>,
    #[serde(default)]
    pub post_tags: Vec<RawPostTagRow>,
}

impl Dataset {
    pub async fn load(path: &Path) -> Result<Self> {
        let data = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read dataset {}", path.display()))?;
        Self::from_json(&data).with_context(|| format!("failed to parse dataset {}", path.display()))
    }

    pub fn from_json(data: &str) -> Result<Self> {
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(data)?)
    }

    /// Fails on ids that cannot be mapped into the shared id space or that
    /// map onto an id already taken by another row.
    pub fn normalized_tags(&self) -> Result<Vec<Tag>> {
        let mut seen = HashSet::new();
        let mut tags = Vec::with_capacity(self.tags.len());
        for row in &self.tags {
            let tag = row
                .normalize()
                .with_context(|| format!("invalid tag row `{}`", row.name))?;
            if !seen.insert(tag.id) {
                bail!("tag row `{}` maps to duplicate id {}", row.name, tag.id);
            }
            tags.push(tag);
        }
        Ok(tags)
    }

    pub fn normalized_posts(&self) -> Vec<Post> {
        self.posts.iter().map(RawPostRow::normalize).collect()
    }

    pub fn normalized_post_tags(&self) -> Result<Vec<PostTag>> {
        self.post_tags
            .iter()
            .map(|row| {
                row.normalize()
                    .with_context(|| format!("invalid post_tag row for post {}", row.post_id))
            })
            .collect()
    }
}
