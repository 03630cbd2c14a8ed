//! Forwarding to external analytics providers
//!
//! Every ingested event is also sent to Mixpanel or PostHog. Delivery is
//! best-effort: it runs on a spawned task, failures are logged, and the
//! event log never depends on the outcome.

use std::fmt;

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::RelayConfig;
use crate::types::EventRecord;

/// Default PostHog ingestion host
pub const DEFAULT_POSTHOG_HOST: &str = "https://us.i.posthog.com";
/// Default Mixpanel ingestion host
pub const DEFAULT_MIXPANEL_HOST: &str = "https://api.mixpanel.com";
/// All relayed events are attributed to one anonymous user
pub const DISTINCT_ID: &str = "default-user";

/// Supported analytics backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Mixpanel,
    PostHog,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Mixpanel => write!(f, "Mixpanel"),
            Provider::PostHog => write!(f, "PostHog"),
        }
    }
}

/// Forwarding errors
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("{0} is not configured")]
    NotConfigured(Provider),
    #[error("{provider} request failed: {source}")]
    Http {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },
    #[error("{provider} rejected event with status {status}")]
    Rejected { provider: Provider, status: u16 },
}

/// Event fields sent to a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardEvent {
    pub project: String,
    pub tag: String,
    pub extra: Option<String>,
}

impl From<&EventRecord> for ForwardEvent {
    fn from(record: &EventRecord) -> Self {
        Self {
            project: record.project.clone(),
            tag: record.tag.clone(),
            extra: record.extra.clone(),
        }
    }
}

/// Client for the analytics backends
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    mixpanel_token: Option<String>,
    mixpanel_host: String,
    posthog_key: Option<String>,
    posthog_host: String,
}

impl Forwarder {
    pub fn new(mixpanel_token: Option<String>, posthog_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            mixpanel_token,
            mixpanel_host: DEFAULT_MIXPANEL_HOST.to_string(),
            posthog_key,
            posthog_host: DEFAULT_POSTHOG_HOST.to_string(),
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(config.mixpanel_token.clone(), config.posthog_key.clone())
            .with_posthog_host(config.posthog_host.clone())
    }

    /// A forwarder with no providers configured
    pub fn disabled() -> Self {
        Self::new(None, None)
    }

    pub fn with_posthog_host(mut self, host: impl Into<String>) -> Self {
        self.posthog_host = host.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_mixpanel_host(mut self, host: impl Into<String>) -> Self {
        self.mixpanel_host = host.into().trim_end_matches('/').to_string();
        self
    }

    pub fn is_configured(&self, provider: Provider) -> bool {
        match provider {
            Provider::Mixpanel => self.mixpanel_token.is_some(),
            Provider::PostHog => self.posthog_key.is_some(),
        }
    }

    pub fn ensure_configured(&self, provider: Provider) -> Result<(), ForwardError> {
        if self.is_configured(provider) {
            Ok(())
        } else {
            Err(ForwardError::NotConfigured(provider))
        }
    }

    /// Endpoint URL and JSON body for one event
    pub fn request_for(
        &self,
        provider: Provider,
        event: &ForwardEvent,
    ) -> Result<(String, Value), ForwardError> {
        match provider {
            Provider::Mixpanel => {
                let token = self
                    .mixpanel_token
                    .as_deref()
                    .ok_or(ForwardError::NotConfigured(provider))?;
                let body = json!([{
                    "event": event.tag,
                    "properties": {
                        "token": token,
                        "distinct_id": DISTINCT_ID,
                        "project": event.project,
                        "tag": event.tag,
                        "extra": event.extra,
                    }
                }]);
                Ok((format!("{}/track", self.mixpanel_host), body))
            }
            Provider::PostHog => {
                let key = self
                    .posthog_key
                    .as_deref()
                    .ok_or(ForwardError::NotConfigured(provider))?;
                let body = json!({
                    "api_key": key,
                    "event": event.tag,
                    "distinct_id": DISTINCT_ID,
                    "properties": {
                        "project": event.project,
                        "tag": event.tag,
                        "extra": event.extra,
                    }
                });
                Ok((format!("{}/capture/", self.posthog_host), body))
            }
        }
    }

    /// Send one event and wait for the provider's answer
    pub async fn deliver(&self, provider: Provider, event: &ForwardEvent) -> Result<(), ForwardError> {
        let (url, body) = self.request_for(provider, event)?;

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|source| ForwardError::Http { provider, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForwardError::Rejected {
                provider,
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    /// Deliver in the background, logging the outcome
    pub fn dispatch(&self, provider: Provider, event: ForwardEvent) {
        if !self.is_configured(provider) {
            tracing::warn!(%provider, tag = %event.tag, "provider not configured, event not forwarded");
            return;
        }

        let forwarder = self.clone();
        tokio::spawn(async move {
            match forwarder.deliver(provider, &event).await {
                Ok(()) => tracing::debug!(%provider, tag = %event.tag, "event forwarded"),
                Err(e) => tracing::warn!(%provider, tag = %event.tag, error = %e, "forwarding failed"),
            }
        });
    }
}
