mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use common::StubRepository;
use std::sync::Arc;
use status_api::api::handlers::health_handler;
use status_api::infrastructure::cache::{CacheService, MemoryCache, NullCache};

fn app(repo: StubRepository, cache: Arc<dyn CacheService>) -> TestServer {
    let state = common::create_test_state(Arc::new(repo), cache);
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = app(StubRepository::seeded(), Arc::new(MemoryCache::new()));

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
}

#[tokio::test]
async fn test_health_cache_down_is_still_healthy() {
    let server = app(StubRepository::seeded(), Arc::new(NullCache::new()));

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["cache"]["status"], "unavailable");
}

#[tokio::test]
async fn test_health_database_down_is_degraded() {
    let server = app(
        StubRepository::failing("connection refused"),
        Arc::new(MemoryCache::new()),
    );

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
    assert!(json.get("version").is_some());
}
