#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use status_api::application::services::StatusService;
use status_api::domain::entities::{StatusData, Subsidiary};
use status_api::domain::repositories::StatusRepository;
use status_api::error::StoreError;
use status_api::infrastructure::cache::CacheService;
use status_api::state::AppState;

pub const TTL_SECONDS: u64 = 300;

/// In-memory record store that counts how often it is read.
pub struct StubRepository {
    rows: Vec<Subsidiary>,
    failure: Option<String>,
    delay: Duration,
    calls: AtomicUsize,
}

impl StubRepository {
    pub fn with_rows(rows: Vec<Subsidiary>) -> Self {
        Self {
            rows,
            failure: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn seeded() -> Self {
        Self::with_rows(vec![
            Subsidiary::new(1, "Subsidiary A", "Operational"),
            Subsidiary::new(2, "Subsidiary B", "Maintenance"),
            Subsidiary::new(3, "Subsidiary C", "Operational"),
        ])
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::with_rows(Vec::new())
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn read(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.failure {
            Some(message) => Err(StoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StatusRepository for StubRepository {
    async fn fetch_summary(&self) -> Result<StatusData, StoreError> {
        self.read().await?;
        Ok(StatusData {
            total_count: self.rows.len() as i64,
            fetched_at: Utc::now(),
        })
    }

    async fn fetch_subsidiaries(&self) -> Result<Vec<Subsidiary>, StoreError> {
        self.read().await?;
        Ok(self.rows.clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(message) => Err(StoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

pub fn create_service(repo: Arc<StubRepository>, cache: Arc<dyn CacheService>) -> StatusService {
    StatusService::new(repo, cache, TTL_SECONDS)
}

pub fn create_test_state(repo: Arc<StubRepository>, cache: Arc<dyn CacheService>) -> AppState {
    AppState::new(Arc::new(create_service(repo, cache)))
}

pub async fn insert_subsidiary(pool: &PgPool, name: &str, status: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO subsidiaries (name, status) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(status)
        .fetch_one(pool)
        .await
        .unwrap()
}
