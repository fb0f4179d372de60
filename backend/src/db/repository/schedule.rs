//! Time block repository trait.
//!
//! Reads return active rows only unless stated otherwise. Every write is a
//! single atomic unit: either all rows change or none do.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{BlockId, CourseId, DayLayout, SchoolYearId, SubjectId, TeacherId, TimeBlock};

/// Repository trait for a course's time blocks.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the backing store is healthy.
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Reads ====================

    /// Fetch a block by id, including inactive (historical) rows.
    async fn get_block(&self, block_id: BlockId) -> RepositoryResult<Option<TimeBlock>>;

    /// Active blocks of one course weekday, ordered by block number.
    async fn active_blocks_for_day(
        &self,
        course_id: CourseId,
        weekday: u8,
    ) -> RepositoryResult<Vec<TimeBlock>>;

    /// All active blocks of a course, ordered by weekday then block number.
    async fn active_blocks_for_course(&self, course_id: CourseId)
        -> RepositoryResult<Vec<TimeBlock>>;

    /// Active CLASE blocks of every course belonging to a school year.
    ///
    /// `weekday` narrows the scan to one day when given.
    async fn active_class_blocks_for_year(
        &self,
        school_year_id: SchoolYearId,
        weekday: Option<u8>,
    ) -> RepositoryResult<Vec<TimeBlock>>;

    // ==================== Writes ====================

    /// Replace the layouts of one or more weekdays of a course.
    ///
    /// For every layout the currently active blocks of that weekday are
    /// deactivated and a fresh generation is inserted with no subject or
    /// teacher. All layouts are applied as one unit.
    ///
    /// # Returns
    /// * `Ok(Vec<TimeBlock>)` - the inserted blocks, ordered by weekday then number
    async fn replace_day_blocks(
        &self,
        course_id: CourseId,
        layouts: &[DayLayout],
    ) -> RepositoryResult<Vec<TimeBlock>>;

    /// Deactivate all active blocks of a course weekday.
    ///
    /// # Returns
    /// * `Ok(usize)` - number of rows deactivated (zero when the day was empty)
    async fn deactivate_day_blocks(&self, course_id: CourseId, weekday: u8)
        -> RepositoryResult<usize>;

    /// Overwrite the subject and teacher of an active block.
    ///
    /// # Returns
    /// * `Ok(TimeBlock)` - the updated row
    /// * `Err(RepositoryError::NotFound)` - if the block is missing or inactive
    async fn update_block_assignment(
        &self,
        block_id: BlockId,
        subject_id: Option<SubjectId>,
        teacher_id: Option<TeacherId>,
    ) -> RepositoryResult<TimeBlock>;
}
