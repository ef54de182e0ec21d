use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use tracing::{debug, instrument, warn};

use crate::config::RecommenderConfig;
use crate::error::{RecommendError, Result};
use crate::model::{PostId, Recommendation, Tag, TagId};
use crate::scoring::{
    popularity_or_neutral, CoOccurrenceIndex, PillarBalance, ScoredCandidate, ScoringContext,
    ScoringPipeline,
};
use crate::store::{PostStore, TagCatalog, TagStatistics};

/// Ranks tags that are not yet applied to a post.
///
/// Holds no state between calls; identical store contents always yield the
/// same ordered output.
#[derive(Clone)]
pub struct Recommender {
    posts: Arc<dyn PostStore>,
    catalog: Arc<dyn TagCatalog>,
    statistics: Arc<dyn TagStatistics>,
    pipeline: ScoringPipeline,
    config: RecommenderConfig,
}

impl Recommender {
    pub fn new(
        posts: Arc<dyn PostStore>,
        catalog: Arc<dyn TagCatalog>,
        statistics: Arc<dyn TagStatistics>,
        config: RecommenderConfig,
    ) -> Self {
        Self {
            posts,
            catalog,
            statistics,
            pipeline: ScoringPipeline::with_weights(config.weights.clone()),
            config,
        }
    }

    /// Single backing store serving all three accessors.
    pub fn from_store<S>(store: Arc<S>, config: RecommenderConfig) -> Self
    where
        S: PostStore + TagCatalog + TagStatistics + 'static,
    {
        Self::new(store.clone(), store.clone(), store, config)
    }

    /// Top suggestions for `post_id` under the configured deadline.
    ///
    /// A missing post yields an empty list. `limit <= 0` selects the configured
    /// default and oversized limits are clamped to `limits.max_limit`.
    #[instrument(skip(self))]
    pub async fn recommend_tags(&self, post_id: PostId, limit: i64) -> Result<Vec<Recommendation>> {
        self.recommend_tags_with_deadline(post_id, limit, self.config.engine.timeout())
            .await
    }

    pub async fn recommend_tags_with_deadline(
        &self,
        post_id: PostId,
        limit: i64,
        deadline: Duration,
    ) -> Result<Vec<Recommendation>> {
        let started = Instant::now();
        match tokio::time::timeout(deadline, self.run(post_id, limit)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(post_id, ?deadline, "recommendation deadline exceeded");
                Err(RecommendError::Timeout {
                    elapsed_ms: started.elapsed().as_millis(),
                })
            }
        }
    }

    async fn run(&self, post_id: PostId, limit: i64) -> Result<Vec<Recommendation>> {
        let limit = self.config.limits.normalize(limit);

        let post = self
            .posts
            .get_post(post_id)
            .await
            .map_err(|source| RecommendError::PostUnavailable { post_id, source })?;
        let Some(post) = post else {
            debug!(post_id, "post not found, nothing to recommend");
            return Ok(Vec::new());
        };

        let all_tags = self
            .catalog
            .all_tags()
            .await
            .map_err(RecommendError::CatalogUnavailable)?;
        let current_tags = self
            .posts
            .current_tags(post_id)
            .await
            .map_err(|source| RecommendError::CurrentTagsUnavailable { post_id, source })?;

        let applied: HashSet<TagId> = current_tags.iter().map(|tag| tag.id).collect();
        let available: Vec<Tag> = all_tags
            .into_iter()
            .filter(|tag| !applied.contains(&tag.id))
            .collect();
        if available.is_empty() {
            debug!(post_id, "every catalog tag is already applied");
            return Ok(Vec::new());
        }

        let co_occurrence = self.load_co_occurrence(&current_tags).await;
        let balance = PillarBalance::new(&current_tags);
        let popularity = self.load_popularity(&available).await;

        let ctx = ScoringContext {
            post: &post,
            current_tags: &current_tags,
            co_occurrence: &co_occurrence,
            balance: &balance,
        };

        let mut candidates: Vec<ScoredCandidate> = available
            .into_iter()
            .zip(popularity)
            .map(|(tag, popularity)| {
                let mut candidate = ScoredCandidate::new(tag);
                self.pipeline.score_candidate(&ctx, &mut candidate, popularity);
                candidate
            })
            .collect();
        let scored = candidates.len();

        self.pipeline.rank(&mut candidates, limit);
        debug!(
            post_id,
            scored,
            returned = candidates.len(),
            current = current_tags.len(),
            "ranked tag candidates"
        );

        Ok(candidates
            .into_iter()
            .map(ScoredCandidate::into_recommendation)
            .collect())
    }

    /// One fetch per request. A failure leaves every candidate without co-occurrence signal.
    async fn load_co_occurrence(&self, current_tags: &[Tag]) -> CoOccurrenceIndex {
        if current_tags.is_empty() {
            return CoOccurrenceIndex::empty();
        }
        match self.statistics.co_occurrence_pairs().await {
            Ok(pairs) => {
                let index =
                    CoOccurrenceIndex::from_pairs(&pairs, self.config.statistics.min_pair_frequency);
                if index.is_empty() {
                    debug!(fetched = pairs.len(), "no co-occurrence pairs above the frequency floor");
                }
                index
            }
            Err(err) => {
                warn!(error = %err, "co-occurrence statistics unavailable, scoring without them");
                CoOccurrenceIndex::empty()
            }
        }
    }

    /// Popularity signal per candidate, in candidate order.
    async fn load_popularity(&self, tags: &[Tag]) -> Vec<f64> {
        let concurrency = self.config.engine.concurrency.max(1);
        let ids: Vec<TagId> = tags.iter().map(|tag| tag.id).collect();
        stream::iter(ids)
            .map(|id| async move {
                popularity_or_neutral(id, self.statistics.tag_usage_count(id).await)
            })
            .buffered(concurrency)
            .collect()
            .await
    }
}
