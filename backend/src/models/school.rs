//! School catalog entities consumed by the schedule engine.
//!
//! These are read-only inputs from the engine's point of view: courses,
//! subjects, teachers and curriculum entries are maintained elsewhere.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::define_id_type;

define_id_type!(i64, SchoolYearId);
define_id_type!(i64, GradeId);
define_id_type!(i64, CourseId);
define_id_type!(i64, SubjectId);
define_id_type!(i64, TeacherId);
define_id_type!(i64, StudentId);

/// Grade level (e.g. "1° Básico").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub id: GradeId,
    pub name: String,
}

/// A course belongs to one grade within one school year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub grade_id: GradeId,
    pub school_year_id: SchoolYearId,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

/// A teacher and the subjects they are qualified to teach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub subjects: BTreeSet<SubjectId>,
    /// Weekly contract hours.
    #[serde(default)]
    pub contract_hours: u32,
}

impl Teacher {
    pub fn teaches(&self, subject_id: SubjectId) -> bool {
        self.subjects.contains(&subject_id)
    }
}

/// Weekly quota (malla curricular) a subject may occupy for a grade in a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumEntry {
    pub subject_id: SubjectId,
    pub grade_id: GradeId,
    pub school_year_id: SchoolYearId,
    /// Quota in pedagogical hours of 45 minutes.
    pub pedagogical_hours: u32,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl CurriculumEntry {
    pub fn quota_minutes(&self) -> i64 {
        crate::models::time::quota_minutes(self.pedagogical_hours)
    }
}

/// Per-student attendance status recorded for one class occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Presente,
    Ausente,
    Atrasado,
    Justificado,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Presente => "PRESENTE",
            AttendanceStatus::Ausente => "AUSENTE",
            AttendanceStatus::Atrasado => "ATRASADO",
            AttendanceStatus::Justificado => "JUSTIFICADO",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentAttendance {
    pub student_id: StudentId,
    pub status: AttendanceStatus,
}

/// Attendance taken for one block on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub block_id: super::time_block::BlockId,
    pub date: NaiveDate,
    #[serde(default)]
    pub entries: Vec<StudentAttendance>,
}

/// Reason a calendar day carries no classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOffKind {
    Feriado,
    Vacaciones,
    Interferiado,
    JornadaAdministrativa,
    Otro,
}

/// A non-instructional day recorded for a school year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonInstructionalDay {
    pub school_year_id: SchoolYearId,
    pub date: NaiveDate,
    pub kind: DayOffKind,
    #[serde(default)]
    pub description: String,
}

fn default_true() -> bool {
    true
}
