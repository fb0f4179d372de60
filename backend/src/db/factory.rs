//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository instances
//! based on runtime configuration.

use std::str::FromStr;
use std::sync::Arc;

use log::info;

use super::repositories::LocalRepository;
use super::repository::{FullRepository, RepositoryResult};
use super::seed::SeedData;
use crate::config::{AppConfig, SchoolDayWindow};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory local repository, optionally seeded from JSON
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("local", "memory")
    ///
    /// # Returns
    /// * `Ok(RepositoryType)` if valid
    /// * `Err` if invalid
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "memory" | "in-memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from the `REPOSITORY_TYPE` environment variable.
    ///
    /// Defaults to Local when the variable is unset or unrecognized.
    pub fn from_env() -> Self {
        std::env::var("REPOSITORY_TYPE")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(Self::Local)
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```
/// use jornada_backend::db::RepositoryFactory;
///
/// let repo = RepositoryFactory::create_local();
/// # let _ = repo;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    pub fn create(repo_type: RepositoryType) -> Arc<dyn FullRepository> {
        match repo_type {
            RepositoryType::Local => Self::create_local(),
        }
    }

    /// Create an empty in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create a local repository pre-loaded with a seed dataset whose day
    /// layouts must fit `school_day`.
    pub async fn create_seeded(
        seed: SeedData,
        school_day: &SchoolDayWindow,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo = LocalRepository::new();
        seed.load_into(&repo, school_day).await?;
        Ok(Arc::new(repo))
    }

    /// Create a repository from application configuration.
    ///
    /// When `repository.seed_path` is set the file is read and loaded into
    /// the new repository; a missing or malformed seed file is an error.
    ///
    /// # Returns
    /// * `Ok(Arc<dyn FullRepository>)` - Repository instance
    /// * `Err(RepositoryError)` - If the type is unknown or the seed fails to load
    pub async fn from_config(config: &AppConfig) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = config.repository_type()?;

        match (repo_type, config.repository.seed_path.as_ref()) {
            (RepositoryType::Local, Some(path)) => {
                info!("Loading seed data from {}", path.display());
                let seed = SeedData::from_file(path)?;
                Self::create_seeded(seed, &config.school_day_window()?).await
            }
            (RepositoryType::Local, None) => Ok(Self::create(repo_type)),
        }
    }
}
