//! Attendance, enrollment and calendar lookups used by compliance reporting.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use crate::models::{AttendanceRecord, BlockId, CourseId, NonInstructionalDay, SchoolYearId};

/// Repository trait for attendance-side reads.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Whether attendance was taken for a block on a date.
    async fn attendance_exists(&self, block_id: BlockId, date: NaiveDate)
        -> RepositoryResult<bool>;

    /// Attendance records for several blocks on one date.
    async fn attendance_records(
        &self,
        block_ids: &[BlockId],
        date: NaiveDate,
    ) -> RepositoryResult<Vec<AttendanceRecord>>;

    /// Active enrollment counts keyed by course. Courses without enrollments
    /// may be absent from the map.
    async fn active_enrollment_counts(
        &self,
        course_ids: &[CourseId],
    ) -> RepositoryResult<HashMap<CourseId, u32>>;

    /// The non-instructional day recorded for a year on a date, if any.
    async fn non_instructional_day(
        &self,
        school_year_id: SchoolYearId,
        date: NaiveDate,
    ) -> RepositoryResult<Option<NonInstructionalDay>>;
}
