//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. All data is stored in
//! memory behind a single `parking_lot::RwLock`, so every trait write is
//! applied under one write guard and is atomic with respect to readers.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::db::repository::*;
use crate::models::{
    AttendanceRecord, BlockId, Course, CourseId, CurriculumEntry, DayLayout, Grade, GradeId,
    NonInstructionalDay, SchoolYear, SchoolYearId, Subject, SubjectId, Teacher, TeacherId,
    TimeBlock,
};

/// In-memory local repository.
///
/// # Example
/// ```
/// use jornada_backend::db::repositories::LocalRepository;
/// use jornada_backend::models::{Course, CourseId, GradeId, SchoolYearId};
///
/// let repo = LocalRepository::new();
/// repo.insert_course(Course {
///     id: CourseId::new(1),
///     name: "1° Básico A".to_string(),
///     grade_id: GradeId::new(1),
///     school_year_id: SchoolYearId::new(2025),
///     active: true,
/// });
/// assert_eq!(repo.course_count(), 1);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    school_years: HashMap<SchoolYearId, SchoolYear>,
    grades: HashMap<GradeId, Grade>,
    courses: HashMap<CourseId, Course>,
    subjects: HashMap<SubjectId, Subject>,
    teachers: HashMap<TeacherId, Teacher>,
    curriculum: Vec<CurriculumEntry>,

    // Every block row ever written, active and historical.
    blocks: BTreeMap<BlockId, TimeBlock>,
    generations: HashMap<(CourseId, u8), u64>,

    attendance: HashMap<(BlockId, NaiveDate), AttendanceRecord>,
    enrollments: HashMap<CourseId, u32>,
    non_instructional_days: HashMap<(SchoolYearId, NaiveDate), NonInstructionalDay>,

    next_block_id: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            school_years: HashMap::new(),
            grades: HashMap::new(),
            courses: HashMap::new(),
            subjects: HashMap::new(),
            teachers: HashMap::new(),
            curriculum: Vec::new(),
            blocks: BTreeMap::new(),
            generations: HashMap::new(),
            attendance: HashMap::new(),
            enrollments: HashMap::new(),
            non_instructional_days: HashMap::new(),
            next_block_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalData {
    fn course_year(&self, course_id: CourseId) -> Option<SchoolYearId> {
        self.courses.get(&course_id).map(|c| c.school_year_id)
    }

    fn sorted_active(&self, filter: impl Fn(&TimeBlock) -> bool) -> Vec<TimeBlock> {
        let mut blocks: Vec<TimeBlock> = self
            .blocks
            .values()
            .filter(|b| b.active && filter(b))
            .cloned()
            .collect();
        blocks.sort_by_key(|b| (b.course_id, b.weekday, b.block_number));
        blocks
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    // ==================== Fixture helpers ====================

    /// Add or replace a school year.
    pub fn insert_school_year(&self, year: SchoolYear) {
        self.data.write().school_years.insert(year.id, year);
    }

    pub fn insert_grade(&self, grade: Grade) {
        self.data.write().grades.insert(grade.id, grade);
    }

    pub fn insert_course(&self, course: Course) {
        self.data.write().courses.insert(course.id, course);
    }

    pub fn insert_subject(&self, subject: Subject) {
        self.data.write().subjects.insert(subject.id, subject);
    }

    pub fn insert_teacher(&self, teacher: Teacher) {
        self.data.write().teachers.insert(teacher.id, teacher);
    }

    /// Add a curriculum entry, replacing any entry for the same
    /// (subject, grade, year) triple.
    pub fn insert_curriculum_entry(&self, entry: CurriculumEntry) {
        let mut data = self.data.write();
        data.curriculum.retain(|e| {
            !(e.subject_id == entry.subject_id
                && e.grade_id == entry.grade_id
                && e.school_year_id == entry.school_year_id)
        });
        data.curriculum.push(entry);
    }

    pub fn set_enrollment_count(&self, course_id: CourseId, count: u32) {
        self.data.write().enrollments.insert(course_id, count);
    }

    pub fn insert_attendance(&self, record: AttendanceRecord) {
        self.data
            .write()
            .attendance
            .insert((record.block_id, record.date), record);
    }

    pub fn insert_non_instructional_day(&self, day: NonInstructionalDay) {
        self.data
            .write()
            .non_instructional_days
            .insert((day.school_year_id, day.date), day);
    }

    pub fn set_subject_active(&self, subject_id: SubjectId, active: bool) {
        if let Some(subject) = self.data.write().subjects.get_mut(&subject_id) {
            subject.active = active;
        }
    }

    pub fn set_teacher_active(&self, teacher_id: TeacherId, active: bool) {
        if let Some(teacher) = self.data.write().teachers.get_mut(&teacher_id) {
            teacher.active = active;
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    pub fn course_count(&self) -> usize {
        self.data.read().courses.len()
    }

    /// Number of block rows stored, including deactivated history.
    pub fn total_block_rows(&self) -> usize {
        self.data.read().blocks.len()
    }

    /// Current save generation of a course weekday (0 when never saved).
    pub fn generation_of(&self, course_id: CourseId, weekday: u8) -> u64 {
        self.data
            .read()
            .generations
            .get(&(course_id, weekday))
            .copied()
            .unwrap_or(0)
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::unavailable("local store is marked unhealthy"));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchoolRepository for LocalRepository {
    async fn get_course(&self, course_id: CourseId) -> RepositoryResult<Option<Course>> {
        self.check_health()?;
        Ok(self.data.read().courses.get(&course_id).cloned())
    }

    async fn get_courses(&self, course_ids: &[CourseId]) -> RepositoryResult<Vec<Course>> {
        self.check_health()?;
        let data = self.data.read();
        Ok(course_ids
            .iter()
            .filter_map(|id| data.courses.get(id).cloned())
            .collect())
    }

    async fn get_school_year(
        &self,
        school_year_id: SchoolYearId,
    ) -> RepositoryResult<Option<SchoolYear>> {
        self.check_health()?;
        Ok(self.data.read().school_years.get(&school_year_id).cloned())
    }

    async fn get_subject(&self, subject_id: SubjectId) -> RepositoryResult<Option<Subject>> {
        self.check_health()?;
        Ok(self.data.read().subjects.get(&subject_id).cloned())
    }

    async fn subject_active_by_id(
        &self,
        subject_id: SubjectId,
    ) -> RepositoryResult<Option<Subject>> {
        self.check_health()?;
        Ok(self
            .data
            .read()
            .subjects
            .get(&subject_id)
            .filter(|s| s.active)
            .cloned())
    }

    async fn subject_active_by_id_locked(
        &self,
        subject_id: SubjectId,
    ) -> RepositoryResult<Option<Subject>> {
        // Serialization is provided by the service lock manager; a plain read
        // under the repository guard is all the in-memory store needs.
        self.subject_active_by_id(subject_id).await
    }

    async fn get_teacher(&self, teacher_id: TeacherId) -> RepositoryResult<Option<Teacher>> {
        self.check_health()?;
        Ok(self.data.read().teachers.get(&teacher_id).cloned())
    }

    async fn active_teachers_teaching_subject(
        &self,
        subject_id: SubjectId,
    ) -> RepositoryResult<Vec<Teacher>> {
        self.check_health()?;
        let data = self.data.read();
        let mut teachers: Vec<Teacher> = data
            .teachers
            .values()
            .filter(|t| t.active && t.teaches(subject_id))
            .cloned()
            .collect();
        teachers.sort_by_key(|t| t.id);
        Ok(teachers)
    }

    async fn active_curriculum_entries(
        &self,
        grade_id: GradeId,
        school_year_id: SchoolYearId,
    ) -> RepositoryResult<Vec<CurriculumEntry>> {
        self.check_health()?;
        let data = self.data.read();
        let mut entries: Vec<CurriculumEntry> = data
            .curriculum
            .iter()
            .filter(|e| e.active && e.grade_id == grade_id && e.school_year_id == school_year_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.subject_id);
        Ok(entries)
    }

    async fn active_curriculum_entry(
        &self,
        subject_id: SubjectId,
        grade_id: GradeId,
        school_year_id: SchoolYearId,
    ) -> RepositoryResult<Option<CurriculumEntry>> {
        self.check_health()?;
        Ok(self
            .data
            .read()
            .curriculum
            .iter()
            .find(|e| {
                e.active
                    && e.subject_id == subject_id
                    && e.grade_id == grade_id
                    && e.school_year_id == school_year_id
            })
            .cloned())
    }
}

#[async_trait]
impl ScheduleRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn get_block(&self, block_id: BlockId) -> RepositoryResult<Option<TimeBlock>> {
        self.check_health()?;
        Ok(self.data.read().blocks.get(&block_id).cloned())
    }

    async fn active_blocks_for_day(
        &self,
        course_id: CourseId,
        weekday: u8,
    ) -> RepositoryResult<Vec<TimeBlock>> {
        self.check_health()?;
        Ok(self
            .data
            .read()
            .sorted_active(|b| b.course_id == course_id && b.weekday == weekday))
    }

    async fn active_blocks_for_course(
        &self,
        course_id: CourseId,
    ) -> RepositoryResult<Vec<TimeBlock>> {
        self.check_health()?;
        Ok(self.data.read().sorted_active(|b| b.course_id == course_id))
    }

    async fn active_class_blocks_for_year(
        &self,
        school_year_id: SchoolYearId,
        weekday: Option<u8>,
    ) -> RepositoryResult<Vec<TimeBlock>> {
        self.check_health()?;
        let data = self.data.read();
        Ok(data.sorted_active(|b| {
            b.is_class()
                && weekday.map_or(true, |w| b.weekday == w)
                && data.course_year(b.course_id) == Some(school_year_id)
        }))
    }

    async fn replace_day_blocks(
        &self,
        course_id: CourseId,
        layouts: &[DayLayout],
    ) -> RepositoryResult<Vec<TimeBlock>> {
        self.check_health()?;
        let mut data = self.data.write();
        if !data.courses.contains_key(&course_id) {
            return Err(RepositoryError::row_not_found(
                "replace_day_blocks",
                "course",
                course_id,
            ));
        }

        let mut inserted = Vec::new();
        for layout in layouts {
            for block in data.blocks.values_mut() {
                if block.active && block.course_id == course_id && block.weekday == layout.weekday
                {
                    block.active = false;
                }
            }

            let generation = {
                let entry = data.generations.entry((course_id, layout.weekday)).or_insert(0);
                *entry += 1;
                *entry
            };

            for spec in &layout.blocks {
                let id = BlockId::new(data.next_block_id);
                data.next_block_id += 1;
                let block = TimeBlock {
                    id,
                    course_id,
                    weekday: layout.weekday,
                    block_number: spec.number,
                    start: spec.start,
                    end: spec.end,
                    block_type: spec.block_type,
                    subject_id: None,
                    teacher_id: None,
                    active: true,
                    generation,
                };
                data.blocks.insert(id, block.clone());
                inserted.push(block);
            }
        }

        inserted.sort_by_key(|b| (b.weekday, b.block_number));
        Ok(inserted)
    }

    async fn deactivate_day_blocks(
        &self,
        course_id: CourseId,
        weekday: u8,
    ) -> RepositoryResult<usize> {
        self.check_health()?;
        let mut data = self.data.write();
        let mut count = 0;
        for block in data.blocks.values_mut() {
            if block.active && block.course_id == course_id && block.weekday == weekday {
                block.active = false;
                count += 1;
            }
        }
        Ok(count)
    }

    async fn update_block_assignment(
        &self,
        block_id: BlockId,
        subject_id: Option<SubjectId>,
        teacher_id: Option<TeacherId>,
    ) -> RepositoryResult<TimeBlock> {
        self.check_health()?;
        let mut data = self.data.write();
        match data.blocks.get_mut(&block_id) {
            Some(block) if block.active => {
                block.subject_id = subject_id;
                block.teacher_id = teacher_id;
                Ok(block.clone())
            }
            _ => Err(RepositoryError::row_not_found(
                "update_block_assignment",
                "time_block",
                block_id,
            )),
        }
    }
}

#[async_trait]
impl AttendanceRepository for LocalRepository {
    async fn attendance_exists(
        &self,
        block_id: BlockId,
        date: NaiveDate,
    ) -> RepositoryResult<bool> {
        self.check_health()?;
        Ok(self.data.read().attendance.contains_key(&(block_id, date)))
    }

    async fn attendance_records(
        &self,
        block_ids: &[BlockId],
        date: NaiveDate,
    ) -> RepositoryResult<Vec<AttendanceRecord>> {
        self.check_health()?;
        let data = self.data.read();
        Ok(block_ids
            .iter()
            .filter_map(|id| data.attendance.get(&(*id, date)).cloned())
            .collect())
    }

    async fn active_enrollment_counts(
        &self,
        course_ids: &[CourseId],
    ) -> RepositoryResult<HashMap<CourseId, u32>> {
        self.check_health()?;
        let data = self.data.read();
        Ok(course_ids
            .iter()
            .filter_map(|id| data.enrollments.get(id).map(|count| (*id, *count)))
            .collect())
    }

    async fn non_instructional_day(
        &self,
        school_year_id: SchoolYearId,
        date: NaiveDate,
    ) -> RepositoryResult<Option<NonInstructionalDay>> {
        self.check_health()?;
        Ok(self
            .data
            .read()
            .non_instructional_days
            .get(&(school_year_id, date))
            .cloned())
    }
}
