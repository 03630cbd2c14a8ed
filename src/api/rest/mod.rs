//! REST API module for HTTP endpoints
//!
//! Provides ingestion and read endpoints:
//! - `GET /mp/:project/:tag[/:extra]` - Record and forward to Mixpanel
//! - `GET /ph/:project/:tag[/:extra]` - Record and forward to PostHog
//! - `GET /api/logs` - Tabular view of the event log
//! - `GET /api/stats` - Store size and counters
//! - `GET /api/series/cumulative` - Running totals per tag and project
//! - `GET /api/series/windowed` - Bucketed counts per project and tag

pub mod logs;
pub mod series;
pub mod track;

use serde::Serialize;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Total count (for paginated responses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data, total: None }
    }

    pub fn with_total(data: T, total: usize) -> Self {
        Self {
            data,
            total: Some(total),
        }
    }
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "BAD_REQUEST".to_string(),
        }
    }
}
