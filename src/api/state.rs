//! Shared application state for HTTP handlers

use std::sync::Arc;

use crate::aggregator::WindowOptions;
use crate::config::RelayConfig;
use crate::event_store::EventStore;
use crate::forward::Forwarder;

/// State passed to every handler through axum `State`
pub struct AppState {
    /// The process-wide event log
    pub store: Arc<EventStore>,

    /// Delivery to Mixpanel / PostHog
    pub forwarder: Forwarder,

    /// Default chart window when a request doesn't override it
    pub window: WindowOptions,
}

impl AppState {
    pub fn new(store: Arc<EventStore>, forwarder: Forwarder, window: WindowOptions) -> Self {
        Self {
            store,
            forwarder,
            window,
        }
    }

    /// Build state from loaded configuration
    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(
            Arc::new(EventStore::new(config.max_logs)),
            Forwarder::from_config(config),
            config.window,
        )
    }
}
