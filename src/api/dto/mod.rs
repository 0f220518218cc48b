//! Data Transfer Objects for API responses.
//!
//! Status payloads are the domain types themselves
//! ([`crate::domain::entities::StatusSnapshot`], [`crate::domain::entities::Subsidiary`]).

pub mod health;
