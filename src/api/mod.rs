//! REST API layer for HTTP request/response handling.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
