mod common;

use common::StubRepository;
use std::sync::Arc;
use std::time::Duration;
use status_api::application::services::STATUS_KEY;
use status_api::domain::entities::{DataSource, Outcome, StatusSnapshot};
use status_api::infrastructure::cache::MemoryCache;

#[tokio::test]
async fn test_simultaneous_misses_both_succeed() {
    let repo = Arc::new(StubRepository::seeded().with_delay(Duration::from_millis(50)));
    let cache = Arc::new(MemoryCache::new());
    let service = common::create_service(repo.clone(), cache.clone());

    let (a, b) = tokio::join!(service.get_status(), service.get_status());

    assert_eq!(a.source, DataSource::Store);
    assert_eq!(b.source, DataSource::Store);
    assert_eq!(a.value.status, Outcome::Success);
    assert_eq!(b.value.status, Outcome::Success);
    assert!((1..=2).contains(&repo.calls()));

    let cached: StatusSnapshot =
        serde_json::from_slice(&cache.peek_raw(STATUS_KEY).unwrap()).unwrap();
    assert!(cached.data == a.value.data || cached.data == b.value.data);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_bounded_store_reads() {
    let repo = Arc::new(StubRepository::seeded().with_delay(Duration::from_millis(20)));
    let cache = Arc::new(MemoryCache::new());
    let service = Arc::new(common::create_service(repo.clone(), cache.clone()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.get_status().await })
        })
        .collect();

    for handle in handles {
        let result = handle.await.unwrap();
        assert_eq!(result.value.status, Outcome::Success);
        assert_eq!(result.value.data.unwrap().total_count, 3);
    }

    assert!(repo.calls() >= 1 && repo.calls() <= 8);

    let after = service.get_status().await;
    assert_eq!(after.source, DataSource::Cache);
}
