use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tag_recommender::model::{CoOccurrencePair, Pillar, Post, Recommendation, Tag, TagId};
use tag_recommender::store::{InMemoryStore, TagCatalog, TagStatistics};
use tag_recommender::{RecommendError, Recommender, RecommenderConfig};

fn fixture_store() -> InMemoryStore {
    let mut store = InMemoryStore::new()
        .with_post(Post::new(1, "Summer beach outfit inspo", "instagram"))
        .with_post(Post::new(
            2,
            "Collab with @mia for the new sneaker campaign",
            "tiktok",
        ))
        .with_tag(Tag::new(10, "Summer Collection", Pillar::Product))
        .with_tag(Tag::new(11, "TikTok Trend", Pillar::Post))
        .with_tag(Tag::new(12, "Creator Spotlight", Pillar::Influencer))
        .with_tag(Tag::new(13, "Holiday Campaign", Pillar::Campaign))
        .with_tag(Tag::new(14, "Sneaker Drop", Pillar::Product))
        .with_tag(Tag::new(15, "Paid Social", Pillar::Ad))
        .with_post_tag(2, 14);

    for history_post in 100..103 {
        store = store
            .with_post(Post::new(history_post, "archive", "instagram"))
            .with_post_tag(history_post, 14)
            .with_post_tag(history_post, 12);
    }
    store
}

fn recommender(store: InMemoryStore) -> Recommender {
    Recommender::from_store(Arc::new(store), RecommenderConfig::default())
}

fn ids(recommendations: &[Recommendation]) -> Vec<TagId> {
    recommendations.iter().map(|r| r.tag.id).collect()
}

fn bulk_store(tag_count: i64) -> InMemoryStore {
    let mut store = InMemoryStore::new().with_post(Post::new(1, "nothing to see", "web"));
    for id in (1..=tag_count).rev() {
        store = store.with_tag(Tag::new(id, &format!("Generic {id:02}"), Pillar::Other));
    }
    store
}

#[tokio::test]
async fn never_recommends_applied_tags() {
    let engine = recommender(fixture_store());
    let recommendations = engine.recommend_tags(2, 10).await.unwrap();

    assert!(!recommendations.is_empty());
    assert!(!ids(&recommendations).contains(&14));
    assert_eq!(recommendations.len(), 5);
}

#[tokio::test]
async fn output_is_deterministic() {
    let engine = recommender(fixture_store());
    let first = engine.recommend_tags(2, 10).await.unwrap();
    let second = engine.recommend_tags(2, 10).await.unwrap();

    assert_eq!(ids(&first), ids(&second));
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.score, b.score);
        assert_eq!(a.reasons, b.reasons);
    }
}

#[tokio::test]
async fn results_are_sorted_and_scores_bounded() {
    let engine = recommender(fixture_store());
    let recommendations = engine.recommend_tags(2, 10).await.unwrap();

    for pair in recommendations.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    for recommendation in &recommendations {
        let signals = recommendation.signals;
        for value in [
            signals.content,
            signals.co_occurrence,
            signals.pillar_balance,
            signals.popularity,
            signals.platform,
        ] {
            assert!((0.0..=1.0).contains(&value));
        }
        assert!(recommendation.score > 0.0 && recommendation.score <= 1.0);
        assert!(!recommendation.reasons.is_empty());
    }
}

#[tokio::test]
async fn co_occurrence_and_diversity_signals_flow_through() {
    let engine = recommender(fixture_store());
    let recommendations = engine.recommend_tags(2, 10).await.unwrap();
    let creator = recommendations
        .iter()
        .find(|r| r.tag.id == 12)
        .expect("creator spotlight recommended");

    assert_eq!(creator.signals.content, 0.5);
    assert!((creator.signals.co_occurrence - 0.3).abs() < 1e-9);
    assert_eq!(creator.signals.pillar_balance, 0.8);
    assert_eq!(creator.signals.popularity, 0.3);
    assert_eq!(creator.signals.platform, 0.8);
    assert_eq!(
        creator.reasons,
        vec![
            "Partial content relevance",
            "Improves tag diversity",
            "Platform relevant"
        ]
    );
    assert_eq!(recommendations[0].tag.id, 12);
}

#[tokio::test]
async fn platform_named_tag_is_fully_relevant() {
    let engine = recommender(fixture_store());
    let recommendations = engine.recommend_tags(2, 10).await.unwrap();
    let trend = recommendations.iter().find(|r| r.tag.id == 11).unwrap();

    assert_eq!(trend.signals.platform, 1.0);
    assert!(trend.reasons.iter().any(|reason| reason == "Platform relevant"));
}

#[tokio::test]
async fn summer_outfit_scenario_end_to_end() {
    let engine = recommender(fixture_store());
    let recommendations = engine.recommend_tags(1, 10).await.unwrap();
    let summer = recommendations.iter().find(|r| r.tag.id == 10).unwrap();

    assert_eq!(summer.signals.content, 0.6);
    assert_eq!(summer.signals.pillar_balance, 0.5);
    assert_eq!(summer.signals.popularity, 0.1);
    assert_eq!(summer.signals.platform, 0.6);
    assert!(summer.score > 0.3);
    assert_eq!(summer.reasons, vec!["Partial content relevance"]);
}

fn assert_send<T: Send>(value: T) -> T {
    value
}

#[tokio::test]
async fn recommendation_future_can_move_across_threads() {
    let engine = recommender(fixture_store());
    let handle = tokio::spawn(assert_send(async move { engine.recommend_tags(2, 10).await }));

    let recommendations = handle.await.unwrap().unwrap();
    assert_eq!(recommendations.len(), 5);
}

#[tokio::test]
async fn missing_post_yields_empty_list() {
    let engine = recommender(fixture_store());
    let recommendations = engine.recommend_tags(999, 10).await.unwrap();
    assert!(recommendations.is_empty());
}

#[tokio::test]
async fn fully_tagged_post_yields_empty_list() {
    let store = InMemoryStore::new()
        .with_post(Post::new(1, "all done", "instagram"))
        .with_tag(Tag::new(1, "One", Pillar::Post))
        .with_tag(Tag::new(2, "Two", Pillar::Ad))
        .with_post_tag(1, 1)
        .with_post_tag(1, 2);
    let recommendations = recommender(store).recommend_tags(1, 10).await.unwrap();
    assert!(recommendations.is_empty());
}

#[tokio::test]
async fn limit_is_respected() {
    let engine = recommender(bulk_store(60));
    assert_eq!(engine.recommend_tags(1, 3).await.unwrap().len(), 3);
}

#[tokio::test]
async fn invalid_limits_are_clamped() {
    let engine = recommender(bulk_store(60));
    assert_eq!(engine.recommend_tags(1, 0).await.unwrap().len(), 10);
    assert_eq!(engine.recommend_tags(1, -4).await.unwrap().len(), 10);
    assert_eq!(engine.recommend_tags(1, 10_000).await.unwrap().len(), 50);
}

#[tokio::test]
async fn ties_break_by_ascending_tag_id() {
    let engine = recommender(bulk_store(20));
    let recommendations = engine.recommend_tags(1, 5).await.unwrap();
    assert_eq!(ids(&recommendations), vec![1, 2, 3, 4, 5]);
}

struct FailingCatalog;

#[async_trait]
impl TagCatalog for FailingCatalog {
    async fn all_tags(&self) -> Result<Vec<Tag>> {
        Err(anyhow!("catalog database unreachable"))
    }
}

#[tokio::test]
async fn catalog_failure_surfaces_as_error() {
    let store = Arc::new(fixture_store());
    let engine = Recommender::new(
        store.clone(),
        Arc::new(FailingCatalog),
        store,
        RecommenderConfig::default(),
    );

    let err = engine.recommend_tags(2, 10).await.unwrap_err();
    assert!(matches!(err, RecommendError::CatalogUnavailable(_)));
    assert!(err.to_string().contains("catalog database unreachable"));
}

/// Statistics source that fails selected lookups.
struct FlakyStatistics {
    inner: InMemoryStore,
    failing_usage: Vec<TagId>,
    pairs_down: bool,
}

#[async_trait]
impl TagStatistics for FlakyStatistics {
    async fn co_occurrence_pairs(&self) -> Result<Vec<CoOccurrencePair>> {
        if self.pairs_down {
            return Err(anyhow!("aggregate table locked"));
        }
        self.inner.co_occurrence_pairs().await
    }

    async fn tag_usage_count(&self, tag_id: TagId) -> Result<u64> {
        if self.failing_usage.contains(&tag_id) {
            return Err(anyhow!("usage lookup failed for {tag_id}"));
        }
        self.inner.tag_usage_count(tag_id).await
    }
}

#[tokio::test]
async fn usage_failure_degrades_to_neutral_popularity() {
    let store = Arc::new(fixture_store());
    let statistics = FlakyStatistics {
        inner: fixture_store(),
        failing_usage: vec![12],
        pairs_down: false,
    };
    let engine = Recommender::new(
        store.clone(),
        store,
        Arc::new(statistics),
        RecommenderConfig::default(),
    );

    let recommendations = engine.recommend_tags(2, 10).await.unwrap();
    let creator = recommendations.iter().find(|r| r.tag.id == 12).unwrap();
    assert_eq!(creator.signals.popularity, 0.5);
    assert_eq!(recommendations.len(), 5);
}

#[tokio::test]
async fn co_occurrence_failure_drops_only_that_signal() {
    let store = Arc::new(fixture_store());
    let statistics = FlakyStatistics {
        inner: fixture_store(),
        failing_usage: Vec::new(),
        pairs_down: true,
    };
    let engine = Recommender::new(
        store.clone(),
        store,
        Arc::new(statistics),
        RecommenderConfig::default(),
    );

    let recommendations = engine.recommend_tags(2, 10).await.unwrap();
    assert_eq!(recommendations.len(), 5);
    assert!(recommendations
        .iter()
        .all(|r| r.signals.co_occurrence == 0.0));
}

struct SlowCatalog;

#[async_trait]
impl TagCatalog for SlowCatalog {
    async fn all_tags(&self) -> Result<Vec<Tag>> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn deadline_is_enforced() {
    let store = Arc::new(fixture_store());
    let engine = Recommender::new(
        store.clone(),
        Arc::new(SlowCatalog),
        store,
        RecommenderConfig::default(),
    );

    let err = engine
        .recommend_tags_with_deadline(2, 10, Duration::from_millis(20))
        .await
        .unwrap_err();
    assert!(matches!(err, RecommendError::Timeout { .. }));
}
