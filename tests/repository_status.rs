mod common;

use sqlx::PgPool;
use std::sync::Arc;
use status_api::domain::repositories::StatusRepository;
use status_api::error::StoreError;
use status_api::infrastructure::persistence::{PgStatusRepository, schema};

#[sqlx::test]
async fn test_seed_if_empty_inserts_once(pool: PgPool) {
    let first = schema::seed_if_empty(&pool).await.unwrap();
    let second = schema::seed_if_empty(&pool).await.unwrap();

    assert_eq!(first, 3);
    assert_eq!(second, 0);
}

#[sqlx::test]
async fn test_seed_skips_populated_table(pool: PgPool) {
    common::insert_subsidiary(&pool, "Existing", "Operational").await;

    let inserted = schema::seed_if_empty(&pool).await.unwrap();

    assert_eq!(inserted, 0);
}

#[sqlx::test]
async fn test_fetch_summary_counts_rows(pool: PgPool) {
    schema::seed_if_empty(&pool).await.unwrap();
    let repo = PgStatusRepository::new(Arc::new(pool));

    let summary = repo.fetch_summary().await.unwrap();

    assert_eq!(summary.total_count, 3);
}

#[sqlx::test]
async fn test_fetch_subsidiaries_ordered_by_id(pool: PgPool) {
    let b = common::insert_subsidiary(&pool, "Beta", "Maintenance").await;
    let a = common::insert_subsidiary(&pool, "Alpha", "Operational").await;
    let repo = PgStatusRepository::new(Arc::new(pool));

    let rows = repo.fetch_subsidiaries().await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, b);
    assert_eq!(rows[1].id, a);
    assert_eq!(rows[1].name, "Alpha");
}

#[sqlx::test]
async fn test_closed_pool_reports_unavailable(pool: PgPool) {
    pool.close().await;
    let repo = PgStatusRepository::new(Arc::new(pool));

    let result = repo.fetch_summary().await;

    assert!(matches!(result, Err(StoreError::Unavailable(_))));
}
