//! Storage failures raised by the repositories.
//!
//! The store fails when it is unavailable, when a write addresses a block
//! that a newer day layout has already deactivated, or when a seed or config
//! document cannot be accepted. Schedule rule outcomes (quota, collisions,
//! closed years) are not storage failures and live in
//! [`crate::services::error`].

use std::fmt;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Where a storage failure happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Repository call or loader step, e.g. `update_block_assignment`.
    pub operation: Option<String>,
    /// Row kind, e.g. `time_block`.
    pub entity: Option<String>,
    pub entity_id: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn for_row(mut self, entity: impl Into<String>, id: impl ToString) -> Self {
        self.entity = Some(entity.into());
        self.entity_id = Some(id.to_string());
        self
    }

    fn is_empty(&self) -> bool {
        self.operation.is_none() && self.entity.is_none()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write!(f, " (")?;
        if let Some(op) = &self.operation {
            write!(f, "in {}", op)?;
        }
        if let (Some(entity), Some(id)) = (&self.entity, &self.entity_id) {
            if self.operation.is_some() {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", entity, id)?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The store refuses requests (the local store's health switch is off).
    #[error("Store unavailable: {message}{context}")]
    Unavailable {
        message: String,
        context: ErrorContext,
    },

    /// A course or block row addressed by id is missing or no longer active.
    #[error("Not found: {message}{context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// Seed rows the store will not accept: broken calendars, malformed block
    /// times, or day layouts and assignments that break schedule rules.
    #[error("Invalid data: {message}{context}")]
    InvalidData {
        message: String,
        context: ErrorContext,
    },

    /// Config or seed files that cannot be read or parsed.
    #[error("Configuration error: {message}{context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Internal error: {message}{context}")]
    Internal {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// A missing or inactive row, e.g. a block replaced by a newer layout.
    pub fn row_not_found(operation: &str, entity: &str, id: impl ToString) -> Self {
        let id = id.to_string();
        Self::NotFound {
            message: format!("{} {} is missing or inactive", entity, id),
            context: ErrorContext::new(operation).for_row(entity, id),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// A seeded day that cannot be loaded.
    pub fn invalid_seed_day(
        course_id: impl ToString,
        weekday: u8,
        message: impl fmt::Display,
    ) -> Self {
        Self::InvalidData {
            message: format!("weekday {}: {}", weekday, message),
            context: ErrorContext::new("load_seed").for_row("course", course_id),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Unavailable { context, .. }
            | Self::NotFound { context, .. }
            | Self::InvalidData { context, .. }
            | Self::Configuration { context, .. }
            | Self::Internal { context, .. } => context,
        }
    }
}
