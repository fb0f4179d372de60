use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::{BlockId, CourseId, SubjectId, TeacherId};

// =========================================================
// Availability types + routes
// =========================================================

pub const AVAILABLE_SUBJECTS: &str = "/v1/courses/{course_id}/blocks/{block_id}/available-subjects";
pub const AVAILABLE_TEACHERS: &str = "/v1/courses/{course_id}/blocks/{block_id}/available-teachers";

/// One curriculum subject evaluated against a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectOption {
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub quota_minutes: i64,
    /// Minutes of this subject on the course's other active class blocks.
    pub assigned_minutes: i64,
    pub remaining_minutes: i64,
    pub assignable: bool,
    pub is_current: bool,
}

/// Subjects that could go on a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectAvailability {
    pub block_id: BlockId,
    pub block_minutes: i64,
    pub current_subject_id: Option<SubjectId>,
    pub subjects: Vec<SubjectOption>,
}

/// The block a teacher is already committed to at an overlapping time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherConflict {
    pub block_id: BlockId,
    pub course_id: CourseId,
    pub course_name: String,
    pub weekday: u8,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherOption {
    pub teacher_id: TeacherId,
    pub teacher_name: String,
    pub contract_hours: u32,
    /// Minutes on active class blocks across the whole school year.
    pub assigned_minutes: i64,
    /// `assigned_minutes` rounded up to pedagogical hours.
    pub assigned_hours: i64,
    pub available: bool,
    pub conflict: Option<TeacherConflict>,
    pub is_current: bool,
}

/// Teachers that could take a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherAvailability {
    pub block_id: BlockId,
    pub subject_id: SubjectId,
    pub current_teacher_id: Option<TeacherId>,
    pub teachers: Vec<TeacherOption>,
}
