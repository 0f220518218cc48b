//! Startup initialisation of the record store.
//!
//! Runs once before the server accepts requests: connect, migrate, seed.
//! Transient failures are retried with a fixed backoff; exhausting the
//! retries is fatal.

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;

use crate::config::Config;
use crate::domain::entities::SEED_SUBSIDIARIES;

/// Builds the connection pool from configuration.
///
/// # Errors
///
/// Returns an error if the first connection cannot be established.
pub async fn connect_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
}

/// Connects, applies migrations and seeds an empty table, retrying on failure.
///
/// Makes one attempt plus `DB_INIT_RETRIES` retries spaced `DB_INIT_BACKOFF_MS` apart.
///
/// # Errors
///
/// Returns the last error once retries are exhausted.
pub async fn initialize(config: &Config) -> Result<PgPool> {
    let strategy =
        FixedInterval::from_millis(config.db_init_backoff_ms).take(config.db_init_retries);

    let mut attempt = 0u32;
    Retry::spawn(strategy, || {
        attempt += 1;
        async move {
            match try_initialize(config).await {
                Ok(pool) => Ok(pool),
                Err(e) => {
                    tracing::warn!(
                        "Database initialisation attempt {} failed: {:#}",
                        attempt,
                        e
                    );
                    Err(e)
                }
            }
        }
    })
    .await
    .context("Database initialisation failed after retries")
}

async fn try_initialize(config: &Config) -> Result<PgPool> {
    let pool = connect_pool(config)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let seeded = seed_if_empty(&pool).await.context("Failed to seed")?;
    if seeded > 0 {
        tracing::info!("Seeded {} subsidiaries", seeded);
    }

    Ok(pool)
}

/// Inserts the default subsidiaries when the table has no rows.
///
/// Returns the number of rows inserted (zero when data already exists).
pub async fn seed_if_empty(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    // Serialises concurrent first boots so only one of them seeds.
    sqlx::query("LOCK TABLE subsidiaries IN EXCLUSIVE MODE")
        .execute(&mut *tx)
        .await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subsidiaries")
        .fetch_one(&mut *tx)
        .await?;

    if existing > 0 {
        tx.commit().await?;
        return Ok(0);
    }

    let mut inserted = 0;
    for row in SEED_SUBSIDIARIES {
        inserted += sqlx::query("INSERT INTO subsidiaries (name, status) VALUES ($1, $2)")
            .bind(row.name)
            .bind(row.status)
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}
