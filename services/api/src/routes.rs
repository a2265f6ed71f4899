use std::sync::Arc;

use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde_json::json;

use career_intake::careers::application::{career_router, ApplicationService, BotVerifier};
use career_intake::careers::positions::PositionCatalog;
use career_intake::content::{ContentClient, GlobalContent};

use crate::infra::AppState;

pub(crate) fn with_career_routes<V>(service: Arc<ApplicationService<V>>) -> axum::Router
where
    V: BotVerifier + 'static,
{
    career_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/career/positions",
            axum::routing::get(positions_endpoint),
        )
        .route(
            "/api/career/positions/:position_id",
            axum::routing::get(position_detail_endpoint),
        )
        .route(
            "/api/v1/content/global",
            axum::routing::get(global_content_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn positions_endpoint() -> Json<serde_json::Value> {
    let catalog = PositionCatalog::standard();
    Json(json!({ "positions": catalog.summaries() }))
}

pub(crate) async fn position_detail_endpoint(Path(position_id): Path<String>) -> Response {
    let catalog = PositionCatalog::standard();
    match catalog.find(&position_id) {
        Some(position) => (StatusCode::OK, Json(position.clone())).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "position not found" })),
        )
            .into_response(),
    }
}

pub(crate) async fn global_content_endpoint(
    Extension(content): Extension<Arc<ContentClient>>,
) -> Json<GlobalContent> {
    Json(content.global().await)
}
