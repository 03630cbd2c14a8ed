//! Ingestion endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::api::state::AppState;
use crate::forward::{ForwardEvent, Provider};

/// Path parameters for ingestion routes
#[derive(Debug, Deserialize)]
pub struct TrackPath {
    pub project: String,
    pub tag: String,
    #[serde(default)]
    pub extra: Option<String>,
}

/// Error body for a failed ingestion
#[derive(Debug, Serialize)]
pub struct TrackFailure {
    pub success: bool,
    pub error: String,
}

/// GET /mp/:project/:tag[/:extra] - Record an event and forward it to Mixpanel
pub async fn track_mixpanel(
    State(state): State<Arc<AppState>>,
    Path(path): Path<TrackPath>,
) -> Response {
    track(&state, Provider::Mixpanel, path)
}

/// GET /ph/:project/:tag[/:extra] - Record an event and forward it to PostHog
///
/// Fails with 500 when PostHog has no API key, before anything is recorded.
pub async fn track_posthog(
    State(state): State<Arc<AppState>>,
    Path(path): Path<TrackPath>,
) -> Response {
    if let Err(e) = state.forwarder.ensure_configured(Provider::PostHog) {
        tracing::error!(error = %e, "error tracking event in PostHog");
        let body = TrackFailure {
            success: false,
            error: e.to_string(),
        };
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    }

    track(&state, Provider::PostHog, path)
}

fn track(state: &AppState, provider: Provider, path: TrackPath) -> Response {
    if path.project.trim().is_empty() || path.tag.trim().is_empty() {
        let error = ApiError::bad_request("project and tag are required");
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    }

    let record = state.store.ingest(path.project, path.tag, path.extra);
    tracing::info!(
        %provider,
        tag = %record.tag,
        project = %record.project,
        extra = %record.extra_or_na(),
        "event received"
    );

    state.forwarder.dispatch(provider, ForwardEvent::from(&record));
    "DONE".into_response()
}
