//! Event record type for the relay log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ingested analytics event
///
/// Records are immutable once created. The timestamp is always stamped by
/// the relay at ingestion time, never taken from the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub timestamp: DateTime<Utc>,
    pub project: String,
    pub tag: String,
    /// Free-form annotation; `None` is distinct from `Some("")`
    pub extra: Option<String>,
}

impl EventRecord {
    /// Create a record stamped with the current UTC time
    pub fn new(project: impl Into<String>, tag: impl Into<String>, extra: Option<String>) -> Self {
        Self::at(Utc::now(), project, tag, extra)
    }

    /// Create a record with an explicit ingestion instant
    pub fn at(
        timestamp: DateTime<Utc>,
        project: impl Into<String>,
        tag: impl Into<String>,
        extra: Option<String>,
    ) -> Self {
        Self {
            timestamp,
            project: project.into(),
            tag: tag.into(),
            extra,
        }
    }

    /// Extra annotation for display, `"N/A"` when absent
    pub fn extra_or_na(&self) -> &str {
        self.extra.as_deref().unwrap_or("N/A")
    }
}
