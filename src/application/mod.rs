//! Application layer services implementing business logic.
//!
//! Services consume repository and cache traits and provide a clean API for
//! HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::status_service::StatusService`] - Cache-aside status reads

pub mod services;
