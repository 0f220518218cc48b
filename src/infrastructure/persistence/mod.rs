//! PostgreSQL persistence.
//!
//! - [`PgStatusRepository`] - Subsidiary reads behind [`crate::domain::repositories::StatusRepository`]
//! - [`schema`] - Pool construction, migrations and first-boot seeding

pub mod pg_status_repository;
pub mod schema;

pub use pg_status_repository::PgStatusRepository;
