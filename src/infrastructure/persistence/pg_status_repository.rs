//! PostgreSQL implementation of the status repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{StatusData, Subsidiary};
use crate::domain::repositories::StatusRepository;
use crate::error::StoreError;

/// PostgreSQL repository for subsidiary reads.
///
/// Shares one pool across all requests; each query checks a connection out
/// and the pool takes it back on every exit path.
pub struct PgStatusRepository {
    pool: Arc<PgPool>,
    simulated_latency: Duration,
}

impl PgStatusRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            simulated_latency: Duration::ZERO,
        }
    }

    /// Adds a fixed delay before every fetch to mimic an expensive aggregation.
    pub fn with_simulated_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = latency;
        self
    }

    async fn simulate_cost(&self) {
        if !self.simulated_latency.is_zero() {
            tokio::time::sleep(self.simulated_latency).await;
        }
    }
}

#[async_trait]
impl StatusRepository for PgStatusRepository {
    async fn fetch_summary(&self) -> Result<StatusData, StoreError> {
        self.simulate_cost().await;

        let total_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subsidiaries")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(StatusData {
            total_count,
            fetched_at: Utc::now(),
        })
    }

    async fn fetch_subsidiaries(&self) -> Result<Vec<Subsidiary>, StoreError> {
        self.simulate_cost().await;

        let rows = sqlx::query_as::<_, Subsidiary>(
            r#"
            SELECT id, name, status
            FROM subsidiaries
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
