use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::{BlockId, CourseId, SubjectId, TeacherId, TimeBlock};

// =========================================================
// Assignment summary types + routes
// =========================================================

pub const SUBJECT_SUMMARY: &str = "/v1/courses/{course_id}/summary/subjects";
pub const TEACHER_SUMMARY: &str = "/v1/courses/{course_id}/summary/teachers";

/// How much of a subject's quota the course schedule covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoverageStatus {
    Completa,
    Parcial,
    SinAsignar,
}

impl CoverageStatus {
    pub fn classify(assigned_minutes: i64, quota_minutes: i64) -> Self {
        if assigned_minutes == quota_minutes {
            CoverageStatus::Completa
        } else if assigned_minutes > 0 && assigned_minutes < quota_minutes {
            CoverageStatus::Parcial
        } else {
            CoverageStatus::SinAsignar
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectCoverage {
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub quota_minutes: i64,
    pub assigned_minutes: i64,
    pub block_count: usize,
    pub status: CoverageStatus,
}

/// Per-subject completion of a course schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub course_id: CourseId,
    pub subjects: Vec<SubjectCoverage>,
    pub total_class_blocks: usize,
    pub blocks_with_subject: usize,
    pub blocks_without_subject: usize,
}

/// Compact reference to a class block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRef {
    pub block_id: BlockId,
    pub weekday: u8,
    pub block_number: u32,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub subject_id: Option<SubjectId>,
}

impl From<&TimeBlock> for BlockRef {
    fn from(block: &TimeBlock) -> Self {
        Self {
            block_id: block.id,
            weekday: block.weekday,
            block_number: block.block_number,
            start: block.start,
            end: block.end,
            subject_id: block.subject_id,
        }
    }
}

/// Blocks of the course taught by one teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherLoad {
    pub teacher_id: TeacherId,
    pub teacher_name: String,
    pub assigned_minutes: i64,
    pub assigned_hours: i64,
    pub blocks: Vec<BlockRef>,
}

/// Per-teacher completion of a course schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherSummary {
    pub course_id: CourseId,
    pub total_class_blocks: usize,
    pub blocks_with_teacher: usize,
    pub blocks_without_teacher: usize,
    pub blocks_with_subject_without_teacher: usize,
    pub blocks_without_subject: usize,
    pub teachers: Vec<TeacherLoad>,
    /// Blocks with a subject still waiting for a teacher.
    pub pending: Vec<BlockRef>,
}
