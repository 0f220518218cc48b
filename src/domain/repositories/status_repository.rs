//! Repository trait for subsidiary status reads.

use crate::domain::entities::{StatusData, Subsidiary};
use crate::error::StoreError;
use async_trait::async_trait;

/// Read-only access to the record store.
///
/// Every call may be slow (aggregation cost); callers must not assume
/// sub-millisecond latency. Failures are returned as-is, never retried here.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStatusRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_status.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// Counts subsidiaries and stamps the result with the read time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the database cannot be reached,
    /// [`StoreError::QueryFailed`] when the query itself fails.
    async fn fetch_summary(&self) -> Result<StatusData, StoreError>;

    /// Lists every subsidiary ordered by id.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_summary`].
    async fn fetch_subsidiaries(&self) -> Result<Vec<Subsidiary>, StoreError>;

    /// Checks database connectivity.
    async fn ping(&self) -> Result<(), StoreError>;
}
