//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::StatusService;

/// Application state. Cloned per request; everything inside is shared.
#[derive(Clone)]
pub struct AppState {
    pub status_service: Arc<StatusService>,
}

impl AppState {
    pub fn new(status_service: Arc<StatusService>) -> Self {
        Self { status_service }
    }
}
