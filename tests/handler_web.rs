mod common;

use axum_test::TestServer;
use common::StubRepository;
use std::sync::Arc;
use status_api::infrastructure::cache::NullCache;
use status_api::web;

#[tokio::test]
async fn test_landing_page() {
    let state = common::create_test_state(
        Arc::new(StubRepository::seeded()),
        Arc::new(NullCache::new()),
    );
    let app = web::routes::public_routes().with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Central IT Hub"));
    assert!(html.contains("/api/status"));
}
