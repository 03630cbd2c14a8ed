//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use super::rest::{logs, series, track};
use super::state::AppState;

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration - any origin may send events
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        // Health check
        .route("/", get(health_check))
        .route("/health", get(health_check))
        // Ingestion
        .route("/mp/:project/:tag", get(track::track_mixpanel))
        .route("/mp/:project/:tag/:extra", get(track::track_mixpanel))
        .route("/ph/:project/:tag", get(track::track_posthog))
        .route("/ph/:project/:tag/:extra", get(track::track_posthog))
        // Inspection
        .route("/api/logs", get(logs::list_logs))
        .route("/api/stats", get(logs::get_stats))
        .route("/api/series/cumulative", get(series::cumulative_series))
        .route("/api/series/windowed", get(series::windowed_series));

    // Handlers may set their own value; these only fill gaps
    for (name, value) in security_headers() {
        router = router.layer(SetResponseHeaderLayer::if_not_present(name, value));
    }

    router.layer(cors).with_state(state)
}

/// Hardening headers added to every response
pub fn security_headers() -> Vec<(HeaderName, HeaderValue)> {
    vec![
        (
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'self'; frame-ancestors 'self'; object-src 'none'"),
        ),
        (
            HeaderName::from_static("cross-origin-opener-policy"),
            HeaderValue::from_static("same-origin"),
        ),
        (
            HeaderName::from_static("origin-agent-cluster"),
            HeaderValue::from_static("?1"),
        ),
        (header::REFERRER_POLICY, HeaderValue::from_static("no-referrer")),
        (
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=15552000; includeSubDomains"),
        ),
        (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        (header::X_DNS_PREFETCH_CONTROL, HeaderValue::from_static("off")),
        (
            HeaderName::from_static("x-download-options"),
            HeaderValue::from_static("noopen"),
        ),
        (header::X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN")),
        (
            HeaderName::from_static("x-permitted-cross-domain-policies"),
            HeaderValue::from_static("none"),
        ),
        (header::X_XSS_PROTECTION, HeaderValue::from_static("0")),
    ]
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
