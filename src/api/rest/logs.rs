//! Event log endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use super::ApiResponse;
use crate::api::state::AppState;
use crate::event_store::StoreStats;
use crate::types::EventRecord;

/// Query parameters for listing logs
#[derive(Debug, Deserialize)]
pub struct ListLogsParams {
    /// Maximum number of records to return (default: 100, max: 1000)
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Number of records to skip
    #[serde(default)]
    pub offset: usize,
    /// Sort order (desc = newest first, asc = insertion order)
    #[serde(default = "default_order")]
    pub order: String,
}

fn default_limit() -> usize {
    100
}

fn default_order() -> String {
    "desc".to_string()
}

/// GET /api/logs - Tabular view of the event log
pub async fn list_logs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListLogsParams>,
) -> impl IntoResponse {
    let mut records = state.store.snapshot();
    let total = records.len();

    if !params.order.eq_ignore_ascii_case("asc") {
        records.reverse();
    }

    let limit = params.limit.min(1000);
    let records: Vec<EventRecord> = records.into_iter().skip(params.offset).take(limit).collect();

    Json(ApiResponse::with_total(records, total))
}

/// Store counters plus fill ratio (null when unbounded)
#[derive(Debug, Serialize)]
pub struct StatsView {
    #[serde(flatten)]
    pub stats: StoreStats,
    pub utilization: Option<f64>,
}

impl From<StoreStats> for StatsView {
    fn from(stats: StoreStats) -> Self {
        let utilization = stats.utilization();
        Self { stats, utilization }
    }
}

/// GET /api/stats - Store size, lifetime counters and fill ratio
pub async fn get_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::new(StatsView::from(state.store.stats())))
}
