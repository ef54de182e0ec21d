//! Read-side accessors the engine consumes.
//!
//! Implementations are expected to tolerate concurrent reads; the engine holds
//! them behind `Arc<dyn ...>` and issues lookups from several tasks at once.

pub mod memory;
pub mod rows;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::{CoOccurrencePair, Post, PostId, Tag, TagId};

pub use memory::InMemoryStore;
pub use rows::{Dataset, RawPostRow, RawPostTagRow, RawTagRow, TagSource, SCRATCH_ID_OFFSET};

#[async_trait]
pub trait PostStore: Send + Sync {
    /// `Ok(None)` when the post does not exist.
    async fn get_post(&self, id: PostId) -> Result<Option<Post>>;

    /// Tags currently applied to the post.
    async fn current_tags(&self, post_id: PostId) -> Result<Vec<Tag>>;
}

#[async_trait]
pub trait TagCatalog: Send + Sync {
    async fn all_tags(&self) -> Result<Vec<Tag>>;
}

#[async_trait]
pub trait TagStatistics: Send + Sync {
    /// Historical pairs; pairs below the store's frequency threshold are omitted.
    async fn co_occurrence_pairs(&self) -> Result<Vec<CoOccurrencePair>>;

    /// Number of posts that have ever carried the tag.
    async fn tag_usage_count(&self, tag_id: TagId) -> Result<u64>;
}
