//! Repository trait definitions for database operations.
//!
//! Storage access is split across focused traits so each service only sees
//! the operations it needs.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`school`]: Read-only catalog lookups (courses, years, subjects, teachers, curriculum)
//! - [`schedule`]: Time block reads and the atomic writes of the schedule engine
//! - [`attendance`]: Attendance, enrollment and non-instructional day lookups
//!
//! # Convenience Trait Bound
//!
//! Services that need every capability take a [`FullRepository`]:
//!
//! ```ignore
//! async fn my_service(repo: &dyn FullRepository) -> RepositoryResult<()> {
//!     let course = repo.get_course(course_id).await?;
//!     let blocks = repo.active_blocks_for_course(course_id).await?;
//!     Ok(())
//! }
//! ```

pub mod attendance;
pub mod error;
pub mod schedule;
pub mod school;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use attendance::AttendanceRepository;
pub use schedule::ScheduleRepository;
pub use school::SchoolRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type implementing the three
/// repository traits.
pub trait FullRepository: SchoolRepository + ScheduleRepository + AttendanceRepository {}

impl<T> FullRepository for T where T: SchoolRepository + ScheduleRepository + AttendanceRepository {}
