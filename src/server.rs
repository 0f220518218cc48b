//! HTTP server initialization and runtime setup.
//!
//! Handles database initialisation, cache selection and the Axum server lifecycle.

use crate::application::services::StatusService;
use crate::config::{CacheBackend, Config};
use crate::infrastructure::cache::{CacheService, MemoryCache, NullCache, RedisCache};
use crate::infrastructure::persistence::{PgStatusRepository, schema};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool, migrations and seed data (with bounded retry)
/// - Cache backend (Redis, in-memory, or disabled)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database initialisation still fails after all retries
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = schema::initialize(&config).await?;
    tracing::info!("Connected to database");

    let cache = build_cache(&config).await;
    let service = build_status_service(&config, pool, cache);
    let state = AppState::new(Arc::new(service));

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Selects the cache implementation from configuration.
///
/// Never fails: an unusable Redis URL degrades to [`NullCache`]. An
/// unreachable Redis is only logged; connections are retried per request.
pub async fn build_cache(config: &Config) -> Arc<dyn CacheService> {
    match (config.cache_backend, &config.redis_url) {
        (CacheBackend::Redis, Some(redis_url)) => {
            match RedisCache::new(redis_url, config.cache_timeout(), &config.cache_key_prefix) {
                Ok(redis) => {
                    if redis.health_check().await {
                        tracing::info!("Cache enabled (Redis)");
                    } else {
                        tracing::warn!("Redis not reachable yet; serving from database until it is");
                    }
                    Arc::new(redis)
                }
                Err(e) => {
                    tracing::warn!("Failed to configure Redis: {}. Using NullCache.", e);
                    Arc::new(NullCache::new())
                }
            }
        }
        (CacheBackend::Memory, _) => {
            tracing::info!("Cache enabled (in-process memory)");
            Arc::new(MemoryCache::new())
        }
        _ => {
            tracing::info!("Cache disabled (NullCache)");
            Arc::new(NullCache::new())
        }
    }
}

/// Wires the repository and cache into a [`StatusService`].
pub fn build_status_service(
    config: &Config,
    pool: PgPool,
    cache: Arc<dyn CacheService>,
) -> StatusService {
    let repository = PgStatusRepository::new(Arc::new(pool))
        .with_simulated_latency(config.store_simulated_latency());

    StatusService::new(Arc::new(repository), cache, config.cache_ttl_seconds)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;

    #[tokio::test]
    async fn test_build_cache_disabled_is_absent() {
        let cache = build_cache(&test_config()).await;
        assert!(cache.connect().await.is_none());
    }

    #[tokio::test]
    async fn test_build_cache_memory_is_available() {
        let mut config = test_config();
        config.cache_backend = CacheBackend::Memory;

        let cache = build_cache(&config).await;
        assert!(cache.connect().await.is_some());
    }

    #[tokio::test]
    async fn test_build_cache_redis_down_degrades_without_failing() {
        let mut config = test_config();
        config.cache_backend = CacheBackend::Redis;
        config.redis_url = Some("redis://127.0.0.1:1/0".to_string());
        config.cache_timeout_ms = 200;

        let cache = build_cache(&config).await;
        assert!(cache.connect().await.is_none());
    }

    #[tokio::test]
    async fn test_build_status_service_uses_configured_ttl() {
        let mut config = test_config();
        config.cache_ttl_seconds = 42;
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();

        let service = build_status_service(&config, pool, build_cache(&config).await);

        assert_eq!(service.ttl_seconds(), 42);
    }
}
