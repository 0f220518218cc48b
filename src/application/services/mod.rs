//! Business logic services for the application layer.

pub mod status_service;

pub use status_service::{STATUS_KEY, SUBSIDIARIES_KEY, StatusService};
