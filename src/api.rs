use serde::{Deserialize, Serialize};
use tag_recommender::{PostId, Recommendation};

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationQuery {
    pub limit: Option<i64>,
}

impl RecommendationQuery {
    /// Missing limits are passed as 0 so the engine applies its configured default.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(0)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRecommendationResponse {
    pub success: bool,
    pub post_id: PostId,
    pub recommendations: Vec<Recommendation>,
    pub total: usize,
}

impl ApiRecommendationResponse {
    pub fn from_recommendations(post_id: PostId, recommendations: Vec<Recommendation>) -> Self {
        Self {
            success: true,
            post_id,
            total: recommendations.len(),
            recommendations,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    pub success: bool,
    pub post_id: PostId,
    pub error: String,
}

impl ApiErrorResponse {
    pub fn new(post_id: PostId, error: String) -> Self {
        Self {
            success: false,
            post_id,
            error,
        }
    }
}
