use std::collections::{BTreeMap, BTreeSet, HashMap};

use anyhow::Result;
use async_trait::async_trait;

use crate::model::{CoOccurrencePair, Post, PostId, PostTag, Tag, TagId};
use crate::store::{Dataset, PostStore, TagCatalog, TagStatistics};

pub const DEFAULT_MIN_PAIR_FREQUENCY: u64 = 2;

/// Snapshot-backed store. Aggregates are derived from the PostTag history on demand.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    posts: HashMap<PostId, Post>,
    tags: BTreeMap<TagId, Tag>,
    post_tags: BTreeMap<PostId, BTreeSet<TagId>>,
    min_pair_frequency: u64,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            posts: HashMap::new(),
            tags: BTreeMap::new(),
            post_tags: BTreeMap::new(),
            min_pair_frequency: DEFAULT_MIN_PAIR_FREQUENCY,
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dataset(dataset: &Dataset, min_pair_frequency: u64) -> Result<Self> {
        let mut store = Self::new().with_min_pair_frequency(min_pair_frequency);
        for post in dataset.normalized_posts() {
            store = store.with_post(post);
        }
        for tag in dataset.normalized_tags()? {
            store = store.with_tag(tag);
        }
        for PostTag { post_id, tag_id } in dataset.normalized_post_tags()? {
            store = store.with_post_tag(post_id, tag_id);
        }
        Ok(store)
    }

    pub fn with_min_pair_frequency(mut self, min_pair_frequency: u64) -> Self {
        self.min_pair_frequency = min_pair_frequency;
        self
    }

    pub fn with_post(mut self, post: Post) -> Self {
        self.posts.insert(post.id, post);
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.insert(tag.id, tag);
        self
    }

    pub fn with_post_tag(mut self, post_id: PostId, tag_id: TagId) -> Self {
        self.post_tags.entry(post_id).or_default().insert(tag_id);
        self
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    fn pair_counts(&self) -> BTreeMap<(TagId, TagId), u64> {
        let mut counts = BTreeMap::new();
        for tag_ids in self.post_tags.values() {
            let ids: Vec<TagId> = tag_ids.iter().copied().collect();
            for (idx, first) in ids.iter().enumerate() {
                for second in &ids[idx + 1..] {
                    *counts.entry((*first, *second)).or_insert(0) += 1;
                }
            }
        }
        counts
    }
}

#[async_trait]
impl PostStore for InMemoryStore {
    async fn get_post(&self, id: PostId) -> Result<Option<Post>> {
        Ok(self.posts.get(&id).cloned())
    }

    async fn current_tags(&self, post_id: PostId) -> Result<Vec<Tag>> {
        let Some(tag_ids) = self.post_tags.get(&post_id) else {
            return Ok(Vec::new());
        };
        Ok(tag_ids
            .iter()
            .filter_map(|tag_id| self.tags.get(tag_id).cloned())
            .collect())
    }
}

#[async_trait]
impl TagCatalog for InMemoryStore {
    async fn all_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.tags.values().cloned().collect())
    }
}

#[async_trait]
impl TagStatistics for InMemoryStore {
    async fn co_occurrence_pairs(&self) -> Result<Vec<CoOccurrencePair>> {
        Ok(self
            .pair_counts()
            .into_iter()
            .filter(|(_, frequency)| *frequency >= self.min_pair_frequency)
            .map(|((a, b), frequency)| CoOccurrencePair::new(a, b, frequency))
            .collect())
    }

    async fn tag_usage_count(&self, tag_id: TagId) -> Result<u64> {
        Ok(self
            .post_tags
            .values()
            .filter(|tag_ids| tag_ids.contains(&tag_id))
            .count() as u64)
    }
}
