//! Storage layer for the schedule engine.
//!
//! Data access goes through the Repository pattern so the engine never sees a
//! concrete store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP layer (axum handlers)                             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (crate::services) - Schedule rules       │
//! │  - Layout validation, quota and collision checks        │
//! │  - Key locks around validate-then-write                 │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │      (in-memory, optional JSON seed)          │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - `repository`: trait definitions and error types
//! - `repositories::local`: in-memory implementation
//! - `seed`: JSON dataset loader
//! - `factory`: creates repository instances from configuration

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repositories;
pub mod repository;
pub mod seed;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
pub use repository::{
    AttendanceRepository, ErrorContext, FullRepository, RepositoryError, RepositoryResult,
    ScheduleRepository, SchoolRepository,
};
pub use seed::SeedData;

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

use crate::config::AppConfig;

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

/// Initialize the global repository singleton from configuration.
///
/// Calling it again after a successful initialization is a no-op.
pub async fn init_repository(config: &AppConfig) -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = RepositoryFactory::from_config(config)
        .await
        .map_err(|e| anyhow::Error::msg(e.to_string()))?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
