//! Repository trait definitions for the domain layer.
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing

pub mod status_repository;

pub use status_repository::StatusRepository;

#[cfg(test)]
pub use status_repository::MockStatusRepository;
