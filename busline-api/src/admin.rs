use axum::{extract::State, routing::get, Json, Router};
use busline_core::BookingStats;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub stats: BookingStats,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/admin/stats", get(stats))
}

/// GET /api/admin/stats
async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.repository.stats().await;
    Json(StatsResponse {
        success: true,
        stats,
    })
}
