//! Health check handler.

use axum::extract::State;
use axum::Json;

use adboard_core::traits::cache::CacheProvider;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = match &state.db {
        Some(pool) => match pool.health_check().await {
            Ok(true) => "ok",
            _ => "unavailable",
        },
        None => "disabled",
    };

    let cache = match state.cache.health_check().await {
        Ok(true) => "ok",
        _ => "unavailable",
    };

    let status = if database == "unavailable" || cache == "unavailable" {
        "degraded"
    } else {
        "ok"
    };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        cache: cache.to_string(),
    }))
}
