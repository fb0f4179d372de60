//! Service layer for the schedule engine.
//!
//! Services sit between the HTTP handlers and the repository. Each public
//! operation takes an [`EngineContext`], reads the clock once, acquires the
//! locks it needs through the [`LockManager`], and commits its changes with a
//! single repository write.
//!
//! - [`schedule_builder`], [`schedule_copier`], [`schedule_eraser`]: day layouts
//! - [`subject_assignment`], [`teacher_assignment`]: per-block assignments
//! - [`availability`], [`summaries`]: read models for the planning screens
//! - [`compliance`]: attendance compliance of a teacher's classes
//! - [`school_year`]: lifecycle phase of a school year

pub mod availability;
pub mod clock;
pub mod compliance;
pub mod context;
pub mod error;
pub mod locks;
pub mod schedule_builder;
pub mod schedule_copier;
pub mod schedule_eraser;
pub mod school_year;
pub mod subject_assignment;
pub mod summaries;
pub mod teacher_assignment;

#[cfg(test)]
mod fixtures;

pub use availability::{available_subjects, available_teachers};
pub use clock::{Clock, FixedClock, SystemClock};
pub use compliance::{classes_today, compliance_report};
pub use context::EngineContext;
pub use error::{ErrorKind, RuleCode, ServiceError, ServiceResult};
pub use locks::{LockKey, LockManager};
pub use schedule_builder::{get_course_schedule, get_day, save_day, validate_day_layout};
pub use schedule_copier::copy_day;
pub use schedule_eraser::erase_day;
pub use school_year::get_year_state;
pub use subject_assignment::{assign_subject, remove_subject};
pub use summaries::{subject_summary, teacher_summary};
pub use teacher_assignment::{assign_teacher, remove_teacher};
