//! Relay configuration from environment variables

use std::env;

use thiserror::Error;

use crate::aggregator::{
    SeriesError, WindowOptions, DEFAULT_BUCKET_MINUTES, DEFAULT_TZ_OFFSET_MINUTES,
    DEFAULT_WINDOW_HOURS,
};
use crate::event_store::DEFAULT_MAX_LOGS;
use crate::forward::DEFAULT_POSTHOG_HOST;
use crate::utils::time::parse_tz_offset;

/// Default listen port
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}: invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("invalid chart window: {0}")]
    Window(#[from] SeriesError),
}

/// Runtime configuration for the relay
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub port: u16,
    /// Log capacity, `None` = unbounded
    pub max_logs: Option<usize>,
    pub window: WindowOptions,
    pub mixpanel_token: Option<String>,
    pub posthog_key: Option<String>,
    pub posthog_host: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_logs: Some(DEFAULT_MAX_LOGS),
            window: WindowOptions::default(),
            mixpanel_token: None,
            posthog_key: None,
            posthog_host: DEFAULT_POSTHOG_HOST.to_string(),
        }
    }
}

impl RelayConfig {
    /// Load configuration from process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("PORT") {
            Some(v) => parse_number("PORT", &v)?,
            None => DEFAULT_PORT,
        };

        let max_logs = match get("MAX_LOGS") {
            Some(v) if v.eq_ignore_ascii_case("unbounded") => None,
            Some(v) => match parse_number::<usize>("MAX_LOGS", &v)? {
                0 => None,
                n => Some(n),
            },
            None => Some(DEFAULT_MAX_LOGS),
        };

        let window_hours = match get("WINDOW_HOURS") {
            Some(v) => parse_number("WINDOW_HOURS", &v)?,
            None => DEFAULT_WINDOW_HOURS,
        };
        let bucket_minutes = match get("BUCKET_MINUTES") {
            Some(v) => parse_number("BUCKET_MINUTES", &v)?,
            None => DEFAULT_BUCKET_MINUTES,
        };
        let tz_offset = match get("DISPLAY_TZ_OFFSET") {
            Some(v) => parse_tz_offset(&v).ok_or(ConfigError::Invalid {
                key: "DISPLAY_TZ_OFFSET",
                value: v,
            })?,
            None => DEFAULT_TZ_OFFSET_MINUTES,
        };
        let window = WindowOptions::new(window_hours, bucket_minutes, tz_offset)?;

        Ok(Self {
            port,
            max_logs,
            window,
            mixpanel_token: get("MIX_PANEL_KEY"),
            posthog_key: get("POST_HOG_KEY"),
            posthog_host: get("POST_HOG_HOST").unwrap_or_else(|| DEFAULT_POSTHOG_HOST.to_string()),
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}
