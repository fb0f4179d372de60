//! JSON dataset loader for the local repository.
//!
//! Lets the server start with a realistic catalog (years, courses, subjects,
//! teachers, curriculum, attendance) without a database. Seeded days obey the
//! same rules as saved ones: each layout is validated against the school-day
//! window, and each assignment must respect the CLASE-only, curriculum,
//! quota, qualification and collision rules. A seed that breaks any of them
//! is rejected whole.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use super::repositories::LocalRepository;
use super::repository::{
    RepositoryError, RepositoryResult, ScheduleRepository, SchoolRepository,
};
use crate::config::SchoolDayWindow;
use crate::models::time::parse_clock_time;
use crate::models::{
    AttendanceRecord, BlockSpec, BlockType, Course, CourseId, CurriculumEntry, DayLayout, Grade,
    NonInstructionalDay, SchoolYear, Subject, SubjectId, Teacher, TeacherId, TimeBlock,
};
use crate::services::schedule_builder::validate_day_layout;
use crate::services::subject_assignment::subject_minutes;
use crate::services::teacher_assignment::first_collision;

/// Complete seed document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub school_years: Vec<SchoolYear>,
    #[serde(default)]
    pub grades: Vec<Grade>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    #[serde(default)]
    pub curriculum: Vec<CurriculumEntry>,
    #[serde(default)]
    pub enrollments: Vec<SeedEnrollment>,
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    #[serde(default)]
    pub non_instructional_days: Vec<NonInstructionalDay>,
    #[serde(default)]
    pub schedules: Vec<SeedDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedEnrollment {
    pub course_id: CourseId,
    pub count: u32,
}

/// One course weekday with its blocks and optional assignments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedDay {
    pub course_id: CourseId,
    pub weekday: u8,
    pub blocks: Vec<SeedBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedBlock {
    pub number: u32,
    pub start: String,
    pub end: String,
    pub block_type: String,
    #[serde(default)]
    pub subject_id: Option<SubjectId>,
    #[serde(default)]
    pub teacher_id: Option<TeacherId>,
}

impl SeedBlock {
    fn to_spec(&self) -> RepositoryResult<BlockSpec> {
        let start = parse_clock_time(&self.start).ok_or_else(|| {
            RepositoryError::validation(format!("Seed block start '{}' is not HH:MM", self.start))
        })?;
        let end = parse_clock_time(&self.end).ok_or_else(|| {
            RepositoryError::validation(format!("Seed block end '{}' is not HH:MM", self.end))
        })?;
        let block_type: BlockType = self.block_type.parse().map_err(RepositoryError::validation)?;
        Ok(BlockSpec::new(self.number, start, end, block_type))
    }
}

impl SeedData {
    pub fn from_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read seed file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> RepositoryResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| RepositoryError::validation(format!("Invalid seed JSON: {}", e)))
    }

    /// Load the dataset into `repo`.
    ///
    /// Catalog rows are inserted first, then day layouts are validated against
    /// `school_day` and written, and their assignments are checked and applied
    /// one block at a time in block-number order.
    pub async fn load_into(
        self,
        repo: &LocalRepository,
        school_day: &SchoolDayWindow,
    ) -> RepositoryResult<()> {
        for year in &self.school_years {
            year.check_calendar().map_err(RepositoryError::validation)?;
        }

        let counts = (
            self.school_years.len(),
            self.courses.len(),
            self.teachers.len(),
            self.schedules.len(),
        );

        for year in self.school_years {
            repo.insert_school_year(year);
        }
        for grade in self.grades {
            repo.insert_grade(grade);
        }
        for course in self.courses {
            repo.insert_course(course);
        }
        for subject in self.subjects {
            repo.insert_subject(subject);
        }
        for teacher in self.teachers {
            repo.insert_teacher(teacher);
        }
        for entry in self.curriculum {
            repo.insert_curriculum_entry(entry);
        }
        for enrollment in self.enrollments {
            repo.set_enrollment_count(enrollment.course_id, enrollment.count);
        }
        for record in self.attendance {
            repo.insert_attendance(record);
        }
        for day in self.non_instructional_days {
            repo.insert_non_instructional_day(day);
        }

        for day in self.schedules {
            let specs = day
                .blocks
                .iter()
                .map(SeedBlock::to_spec)
                .collect::<RepositoryResult<Vec<_>>>()?;
            validate_day_layout(day.weekday, &specs, school_day).map_err(|e| {
                RepositoryError::invalid_seed_day(day.course_id, day.weekday, e)
            })?;

            let course = repo.get_course(day.course_id).await?.ok_or_else(|| {
                RepositoryError::row_not_found("load_seed", "course", day.course_id)
            })?;
            let layout = DayLayout {
                weekday: day.weekday,
                blocks: specs,
            };
            let inserted = repo.replace_day_blocks(course.id, &[layout]).await?;

            let mut assignments: Vec<&SeedBlock> = day
                .blocks
                .iter()
                .filter(|b| b.subject_id.is_some() || b.teacher_id.is_some())
                .collect();
            assignments.sort_by_key(|b| b.number);
            for seed_block in assignments {
                let block = inserted
                    .iter()
                    .find(|b| b.block_number == seed_block.number)
                    .ok_or_else(|| {
                        RepositoryError::invalid_seed_day(
                            course.id,
                            day.weekday,
                            format!("block {} was not written", seed_block.number),
                        )
                    })?;
                let violation = assignment_violation(repo, &course, block, seed_block).await?;
                if let Some(reason) = violation {
                    return Err(RepositoryError::invalid_seed_day(
                        course.id,
                        day.weekday,
                        reason,
                    ));
                }
                repo.update_block_assignment(
                    block.id,
                    seed_block.subject_id,
                    seed_block.teacher_id,
                )
                .await?;
            }
        }

        info!(
            "Seeded local repository: {} school years, {} courses, {} teachers, {} schedule days",
            counts.0, counts.1, counts.2, counts.3
        );
        Ok(())
    }
}

/// Why a seeded assignment cannot be applied to `block`, if it cannot.
async fn assignment_violation(
    repo: &LocalRepository,
    course: &Course,
    block: &TimeBlock,
    seed_block: &SeedBlock,
) -> RepositoryResult<Option<String>> {
    let Some(subject_id) = seed_block.subject_id else {
        return Ok(Some(format!(
            "block {} has a teacher but no subject",
            block.block_number
        )));
    };
    if !block.is_class() {
        return Ok(Some(format!(
            "block {} is {}, only CLASE blocks take a subject",
            block.block_number, block.block_type
        )));
    }

    if repo.subject_active_by_id(subject_id).await?.is_none() {
        return Ok(Some(format!("subject {} is missing or inactive", subject_id)));
    }
    let Some(entry) = repo
        .active_curriculum_entry(subject_id, course.grade_id, course.school_year_id)
        .await?
    else {
        return Ok(Some(format!(
            "subject {} is not in the curriculum of {}",
            subject_id, course.name
        )));
    };
    let course_blocks = repo.active_blocks_for_course(course.id).await?;
    let assigned =
        subject_minutes(&course_blocks, subject_id, Some(block.id)) + block.duration_minutes();
    if assigned > entry.quota_minutes() {
        return Ok(Some(format!(
            "subject {} would have {} minutes, quota is {}",
            subject_id,
            assigned,
            entry.quota_minutes()
        )));
    }

    let Some(teacher_id) = seed_block.teacher_id else {
        return Ok(None);
    };
    let teacher = repo.get_teacher(teacher_id).await?;
    let Some(teacher) = teacher.filter(|t| t.active) else {
        return Ok(Some(format!("teacher {} is missing or inactive", teacher_id)));
    };
    if !teacher.teaches(subject_id) {
        return Ok(Some(format!(
            "teacher {} does not teach subject {}",
            teacher.id, subject_id
        )));
    }
    let candidates = repo
        .active_class_blocks_for_year(course.school_year_id, Some(block.weekday))
        .await?;
    if let Some(other) = first_collision(&candidates, block, teacher.id) {
        return Ok(Some(format!(
            "teacher {} already teaches block {} of course {} at an overlapping time",
            teacher.id, other.block_number, other.course_id
        )));
    }
    Ok(None)
}
