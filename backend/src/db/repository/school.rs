//! Catalog lookups the schedule engine depends on.
//!
//! Courses, school years, subjects, teachers and curriculum entries are
//! maintained by plain CRUD elsewhere; the engine only reads them.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{
    Course, CourseId, CurriculumEntry, GradeId, SchoolYear, SchoolYearId, Subject, SubjectId,
    Teacher, TeacherId,
};

/// Repository trait for catalog lookups.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait SchoolRepository: Send + Sync {
    // ==================== Courses & Years ====================

    /// Fetch a course by id, active or not.
    async fn get_course(&self, course_id: CourseId) -> RepositoryResult<Option<Course>>;

    /// Fetch several courses at once. Unknown ids are skipped.
    async fn get_courses(&self, course_ids: &[CourseId]) -> RepositoryResult<Vec<Course>>;

    async fn get_school_year(
        &self,
        school_year_id: SchoolYearId,
    ) -> RepositoryResult<Option<SchoolYear>>;

    // ==================== Subjects ====================

    /// Fetch a subject by id regardless of its active flag (used for display names).
    async fn get_subject(&self, subject_id: SubjectId) -> RepositoryResult<Option<Subject>>;

    /// Fetch an active subject.
    async fn subject_active_by_id(&self, subject_id: SubjectId)
        -> RepositoryResult<Option<Subject>>;

    /// Fetch an active subject with a locking read.
    ///
    /// Backends with row locks take `SELECT ... FOR UPDATE` semantics here so a
    /// concurrent deactivation cannot interleave with an assignment. The caller
    /// must already hold the service-level lock for the subject.
    async fn subject_active_by_id_locked(
        &self,
        subject_id: SubjectId,
    ) -> RepositoryResult<Option<Subject>>;

    // ==================== Teachers ====================

    /// Fetch a teacher by id, active or not.
    async fn get_teacher(&self, teacher_id: TeacherId) -> RepositoryResult<Option<Teacher>>;

    /// Active teachers qualified to teach a subject.
    async fn active_teachers_teaching_subject(
        &self,
        subject_id: SubjectId,
    ) -> RepositoryResult<Vec<Teacher>>;

    // ==================== Curriculum ====================

    /// Active curriculum entries for a grade in a school year.
    async fn active_curriculum_entries(
        &self,
        grade_id: GradeId,
        school_year_id: SchoolYearId,
    ) -> RepositoryResult<Vec<CurriculumEntry>>;

    /// The active curriculum entry for one subject, if any.
    async fn active_curriculum_entry(
        &self,
        subject_id: SubjectId,
        grade_id: GradeId,
        school_year_id: SchoolYearId,
    ) -> RepositoryResult<Option<CurriculumEntry>>;
}
