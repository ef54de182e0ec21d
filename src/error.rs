use thiserror::Error;

use crate::model::PostId;

/// Failures that abort a whole recommendation request.
///
/// Per-candidate lookups never surface here; they degrade to neutral signals.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("tag catalog unavailable: {0:#}")]
    CatalogUnavailable(anyhow::Error),

    #[error("failed to load post {post_id}: {source:#}")]
    PostUnavailable {
        post_id: PostId,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to load current tags for post {post_id}: {source:#}")]
    CurrentTagsUnavailable {
        post_id: PostId,
        #[source]
        source: anyhow::Error,
    },

    #[error("recommendation timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u128 },
}

pub type Result<T> = std::result::Result<T, RecommendError>;
