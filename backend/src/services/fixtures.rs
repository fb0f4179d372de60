//! Shared school dataset for service unit tests.
//!
//! Year 2025 runs its term from Monday 2025-03-03 to 2025-12-19. Grade 1 has
//! two courses, 1A and 1B. Curriculum for grade 1: Matemática 2 hours (90
//! minutes), Lenguaje 1 hour (45), Historia 3 hours (135). Ana teaches
//! Matemática and Lenguaje, Bruno teaches Matemática, Carla (inactive)
//! teaches Matemática. The clock starts on Monday 2025-03-03 at 10:00.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use super::clock::FixedClock;
use super::context::EngineContext;
use super::schedule_builder::save_day;
use crate::db::repositories::LocalRepository;
use crate::models::{
    BlockSpec, BlockType, Course, CourseId, CurriculumEntry, Grade, GradeId, SchoolYear,
    SchoolYearId, Subject, SubjectId, Teacher, TeacherId, TimeBlock,
};

pub const YEAR: SchoolYearId = SchoolYearId(2025);
pub const GRADE: GradeId = GradeId(1);
pub const COURSE_A: CourseId = CourseId(1);
pub const COURSE_B: CourseId = CourseId(2);
pub const MATH: SubjectId = SubjectId(10);
pub const LANGUAGE: SubjectId = SubjectId(11);
pub const HISTORY: SubjectId = SubjectId(12);
/// Exists but has no curriculum entry for grade 1.
pub const ART: SubjectId = SubjectId(13);
pub const ANA: TeacherId = TeacherId(100);
pub const BRUNO: TeacherId = TeacherId(101);
pub const CARLA: TeacherId = TeacherId(102);

pub fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn spec(number: u32, start: (u32, u32), end: (u32, u32), block_type: BlockType) -> BlockSpec {
    BlockSpec::new(number, t(start.0, start.1), t(end.0, end.1), block_type)
}

/// `1 CLASE 08:00-08:45, 2 CLASE 08:45-09:30, 3 RECREO 09:30-09:45, 4 CLASE 09:45-10:30`
pub fn standard_day() -> Vec<BlockSpec> {
    vec![
        spec(1, (8, 0), (8, 45), BlockType::Clase),
        spec(2, (8, 45), (9, 30), BlockType::Clase),
        spec(3, (9, 30), (9, 45), BlockType::Recreo),
        spec(4, (9, 45), (10, 30), BlockType::Clase),
    ]
}

pub struct Fixture {
    pub repo: LocalRepository,
    pub clock: Arc<FixedClock>,
    pub ctx: EngineContext,
}

impl Fixture {
    pub fn new() -> Self {
        let repo = LocalRepository::new();
        repo.insert_school_year(
            SchoolYear::new(YEAR, 2025, d(2025, 1, 6), d(2025, 3, 3), d(2025, 12, 19)).unwrap(),
        );
        repo.insert_grade(Grade {
            id: GRADE,
            name: "1° Básico".to_string(),
        });
        for (id, name) in [(COURSE_A, "1° Básico A"), (COURSE_B, "1° Básico B")] {
            repo.insert_course(Course {
                id,
                name: name.to_string(),
                grade_id: GRADE,
                school_year_id: YEAR,
                active: true,
            });
        }
        for (id, name) in [
            (MATH, "Matemática"),
            (LANGUAGE, "Lenguaje"),
            (HISTORY, "Historia"),
            (ART, "Artes"),
        ] {
            repo.insert_subject(Subject {
                id,
                name: name.to_string(),
                active: true,
            });
        }
        for (subject_id, hours) in [(MATH, 2), (LANGUAGE, 1), (HISTORY, 3)] {
            repo.insert_curriculum_entry(CurriculumEntry {
                subject_id,
                grade_id: GRADE,
                school_year_id: YEAR,
                pedagogical_hours: hours,
                active: true,
            });
        }
        repo.insert_teacher(teacher(ANA, "Ana Rojas", true, &[MATH, LANGUAGE]));
        repo.insert_teacher(teacher(BRUNO, "Bruno Díaz", true, &[MATH]));
        repo.insert_teacher(teacher(CARLA, "Carla Soto", false, &[MATH]));
        repo.set_enrollment_count(COURSE_A, 30);
        repo.set_enrollment_count(COURSE_B, 28);

        let clock = Arc::new(FixedClock::at(d(2025, 3, 3), 10, 0).unwrap());
        let ctx = EngineContext::new(Arc::new(repo.clone()), clock.clone());
        Self { repo, clock, ctx }
    }

    /// Save [`standard_day`] for a course weekday and return its blocks.
    pub async fn save_standard_day(&self, course_id: CourseId, weekday: u8) -> Vec<TimeBlock> {
        save_day(&self.ctx, course_id, weekday, standard_day())
            .await
            .unwrap()
            .blocks
    }

    /// Close the school year by moving the clock past the term end.
    pub fn close_year(&self) {
        self.clock
            .set(d(2025, 12, 20).and_hms_opt(9, 0, 0).unwrap());
    }
}

fn teacher(id: TeacherId, name: &str, active: bool, subjects: &[SubjectId]) -> Teacher {
    Teacher {
        id,
        name: name.to_string(),
        active,
        subjects: subjects.iter().copied().collect::<BTreeSet<_>>(),
        contract_hours: 30,
    }
}
