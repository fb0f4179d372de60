//! Shared helpers for integration tests: a seeded school and scoped env vars.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveTime};

use jornada_backend::config::SchoolDayWindow;
use jornada_backend::db::{LocalRepository, SeedData};
use jornada_backend::models::{BlockSpec, BlockType, CourseId, SchoolYearId, SubjectId, TeacherId};
use jornada_backend::services::{EngineContext, FixedClock};

pub const YEAR: SchoolYearId = SchoolYearId(2025);
pub const COURSE_A: CourseId = CourseId(1);
pub const COURSE_B: CourseId = CourseId(2);
/// 2 pedagogical hours in grade 1.
pub const MATH: SubjectId = SubjectId(10);
/// 1 pedagogical hour in grade 1.
pub const LANGUAGE: SubjectId = SubjectId(11);
pub const ANA: TeacherId = TeacherId(100);
pub const BRUNO: TeacherId = TeacherId(101);

/// Grade 1 of 2025 with courses 1A and 1B. Ana teaches Matemática and
/// Lenguaje, Bruno teaches Matemática.
pub const SCHOOL_SEED: &str = r#"
{
  "school_years": [
    {"id": 2025, "year": 2025, "planning_start": "2025-01-06", "term_start": "2025-03-03", "term_end": "2025-12-19"}
  ],
  "grades": [{"id": 1, "name": "1° Básico"}],
  "courses": [
    {"id": 1, "name": "1° Básico A", "grade_id": 1, "school_year_id": 2025},
    {"id": 2, "name": "1° Básico B", "grade_id": 1, "school_year_id": 2025}
  ],
  "subjects": [
    {"id": 10, "name": "Matemática"},
    {"id": 11, "name": "Lenguaje"}
  ],
  "teachers": [
    {"id": 100, "name": "Ana Rojas", "subjects": [10, 11], "contract_hours": 30},
    {"id": 101, "name": "Bruno Díaz", "subjects": [10], "contract_hours": 20}
  ],
  "curriculum": [
    {"subject_id": 10, "grade_id": 1, "school_year_id": 2025, "pedagogical_hours": 2},
    {"subject_id": 11, "grade_id": 1, "school_year_id": 2025, "pedagogical_hours": 1}
  ],
  "enrollments": [
    {"course_id": 1, "count": 30},
    {"course_id": 2, "count": 28}
  ]
}
"#;

pub struct School {
    pub repo: LocalRepository,
    pub clock: Arc<FixedClock>,
    pub ctx: EngineContext,
}

/// Seeded school with the clock on Monday 2025-03-03 at 10:00.
pub async fn school() -> School {
    let repo = LocalRepository::new();
    SeedData::from_json_str(SCHOOL_SEED)
        .expect("seed parses")
        .load_into(&repo, &SchoolDayWindow::default())
        .await
        .expect("seed loads");
    let clock = Arc::new(FixedClock::at(date(2025, 3, 3), 10, 0).expect("valid time"));
    let ctx = EngineContext::new(Arc::new(repo.clone()), clock.clone());
    School { repo, clock, ctx }
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn block(number: u32, start: (u32, u32), end: (u32, u32), block_type: BlockType) -> BlockSpec {
    BlockSpec::new(number, time(start.0, start.1), time(end.0, end.1), block_type)
}

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily set (`Some`) or removed
/// (`None`), restoring them afterwards even on panic. Calls are serialized
/// because the environment is process-global.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::apply(changes);
    f()
}

struct ScopedEnv {
    previous: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let previous = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (key, value) in changes {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
        Self { previous }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            match value {
                Some(v) => std::env::set_var(&key, v),
                None => std::env::remove_var(&key),
            }
        }
    }
}
