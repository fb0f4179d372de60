//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::services::EngineContext;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository, clock and lock registry used by every service call
    pub engine: EngineContext,
}

impl AppState {
    pub fn new(engine: EngineContext) -> Self {
        Self { engine }
    }

    /// State backed by `repository` and the host wall clock.
    pub fn with_repository(repository: Arc<dyn FullRepository>) -> Self {
        Self::new(EngineContext::with_system_clock(repository))
    }
}
