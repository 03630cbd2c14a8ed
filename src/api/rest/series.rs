//! Chart series endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use super::{ApiError, ApiResponse};
use crate::aggregator::{SeriesRequest, WindowOptions};
use crate::api::state::AppState;
use crate::utils::time::parse_tz_offset;

/// Query parameters for the windowed view; unset fields use server defaults
#[derive(Debug, Default, Deserialize)]
pub struct WindowParams {
    pub window_hours: Option<u32>,
    pub bucket_minutes: Option<u32>,
    /// `+05:30` style or plain minutes
    #[serde(alias = "tz_offset")]
    pub tz_offset_minutes: Option<String>,
}

impl WindowParams {
    fn resolve(&self, defaults: &WindowOptions) -> Result<WindowOptions, String> {
        let tz_offset = match self.tz_offset_minutes.as_deref() {
            Some(raw) => parse_tz_offset(raw)
                .ok_or_else(|| format!("invalid tz_offset_minutes '{}'", raw))?,
            None => defaults.tz_offset_minutes(),
        };

        WindowOptions::new(
            self.window_hours.unwrap_or(defaults.window_hours()),
            self.bucket_minutes.unwrap_or(defaults.bucket_minutes()),
            tz_offset,
        )
        .map_err(|e| e.to_string())
    }
}

/// GET /api/series/cumulative - Running totals, tag -> project -> points
pub async fn cumulative_series(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let records = state.store.snapshot();
    let series = SeriesRequest::Cumulative.build(&records, Utc::now());
    Json(ApiResponse::new(series))
}

/// GET /api/series/windowed - Bucket counts, project -> tag -> points
pub async fn windowed_series(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WindowParams>,
) -> Response {
    let options = match params.resolve(&state.window) {
        Ok(options) => options,
        Err(message) => {
            let error = ApiError::bad_request(message);
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    let records = state.store.snapshot();
    let series = SeriesRequest::Windowed(options).build(&records, Utc::now());
    (StatusCode::OK, Json(ApiResponse::new(series))).into_response()
}
