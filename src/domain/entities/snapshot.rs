//! Status snapshot, the cacheable unit returned by `/api/status`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message attached to a snapshot freshly read from the database.
pub const STORE_MESSAGE: &str = "Data retrieved from database";

/// Message attached to a snapshot served from the cache.
pub const CACHE_MESSAGE: &str = "Data retrieved from cache";

/// Outcome tag of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Error,
}

/// Aggregate payload of a successful snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusData {
    pub total_count: i64,
    pub fetched_at: DateTime<Utc>,
}

/// Status response body.
///
/// # JSON Shape
///
/// ```json
/// {
///   "status": "success",
///   "message": "Data retrieved from database",
///   "data": { "total_count": 3, "fetched_at": "2026-10-18T09:00:00Z" }
/// }
/// ```
///
/// Error snapshots carry `"status": "error"` and no `data` field. They are
/// never written to the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub status: Outcome,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<StatusData>,
}

impl StatusSnapshot {
    /// Builds a successful snapshot from a fresh store read.
    pub fn from_store(data: StatusData) -> Self {
        Self {
            status: Outcome::Success,
            message: STORE_MESSAGE.to_string(),
            data: Some(data),
        }
    }

    /// Builds an error snapshot describing a store failure.
    pub fn error(detail: impl std::fmt::Display) -> Self {
        Self {
            status: Outcome::Error,
            message: format!("Database error: {}", detail),
            data: None,
        }
    }

    /// Rewrites the provenance message of a snapshot read back from the cache.
    pub fn mark_cached(mut self) -> Self {
        self.message = CACHE_MESSAGE.to_string();
        self
    }

    pub fn is_error(&self) -> bool {
        self.status == Outcome::Error
    }
}

/// Where a value returned by the status service came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Cache,
    Store,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Store => "store",
        }
    }
}

/// A value tagged with its [`DataSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub value: T,
    pub source: DataSource,
}

impl<T> Sourced<T> {
    pub fn cache(value: T) -> Self {
        Self {
            value,
            source: DataSource::Cache,
        }
    }

    pub fn store(value: T) -> Self {
        Self {
            value,
            source: DataSource::Store,
        }
    }

    pub fn is_cache_hit(&self) -> bool {
        self.source == DataSource::Cache
    }
}
