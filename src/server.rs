use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::api::{ApiErrorResponse, ApiRecommendationResponse, RecommendationQuery};
use tag_recommender::{PostId, RecommendError, Recommender};

#[derive(Clone)]
struct AppState {
    recommender: Arc<Recommender>,
}

pub async fn serve(args: crate::ServeArgs, recommender: Recommender) -> Result<(), String> {
    let app = router(recommender);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("failed to bind server: {}", err))?;
    info!(%addr, "serving tag recommendations");

    axum::serve(listener, app)
        .await
        .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

fn router(recommender: Recommender) -> Router {
    let state = AppState {
        recommender: Arc::new(recommender),
    };

    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/posts/:post_id/tag-recommendations",
            get(recommendations_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn recommendations_handler(
    State(state): State<AppState>,
    Path(post_id): Path<PostId>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<ApiRecommendationResponse>, (StatusCode, Json<ApiErrorResponse>)> {
    match state.recommender.recommend_tags(post_id, query.limit()).await {
        Ok(recommendations) => Ok(Json(ApiRecommendationResponse::from_recommendations(
            post_id,
            recommendations,
        ))),
        Err(err) => {
            error!(post_id, error = %err, "tag recommendation failed");
            let status = match &err {
                RecommendError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err((status, Json(ApiErrorResponse::new(post_id, err.to_string()))))
        }
    }
}
