use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{
    AttendanceRecord, AttendanceStatus, BlockId, CourseId, DayOffKind, NonInstructionalDay,
    SchoolYearId, SubjectId, TeacherId,
};

// =========================================================
// Attendance compliance types + routes
// =========================================================

pub const TEACHER_COMPLIANCE: &str = "/v1/teachers/{teacher_id}/compliance";
pub const TEACHER_CLASSES_TODAY: &str = "/v1/teachers/{teacher_id}/classes-today";

/// Whether attendance for one class occurrence was taken, relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceState {
    Tomada,
    NoTomada,
    EnCurso,
    Programada,
}

/// Student counts per attendance status for one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceBreakdown {
    pub presente: u32,
    pub ausente: u32,
    pub atrasado: u32,
    pub justificado: u32,
    pub total: u32,
}

impl From<&AttendanceRecord> for AttendanceBreakdown {
    fn from(record: &AttendanceRecord) -> Self {
        let mut breakdown = AttendanceBreakdown::default();
        for entry in &record.entries {
            match entry.status {
                AttendanceStatus::Presente => breakdown.presente += 1,
                AttendanceStatus::Ausente => breakdown.ausente += 1,
                AttendanceStatus::Atrasado => breakdown.atrasado += 1,
                AttendanceStatus::Justificado => breakdown.justificado += 1,
            }
            breakdown.total += 1;
        }
        breakdown
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOff {
    pub kind: DayOffKind,
    pub description: String,
}

impl From<NonInstructionalDay> for DayOff {
    fn from(day: NonInstructionalDay) -> Self {
        Self {
            kind: day.kind,
            description: day.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceBlock {
    pub block_id: BlockId,
    pub course_id: CourseId,
    pub course_name: String,
    pub block_number: u32,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub subject_id: Option<SubjectId>,
    pub subject_name: Option<String>,
    pub state: ComplianceState,
    /// Present only when attendance was taken.
    pub attendance: Option<AttendanceBreakdown>,
    pub enrolled_students: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceTotals {
    pub total_blocks: usize,
    pub tomada: usize,
    pub no_tomada: usize,
    pub en_curso: usize,
    pub programada: usize,
    /// `tomada / (tomada + no_tomada)` as a percentage; `None` when nothing is due yet.
    pub compliance_percentage: Option<f64>,
}

impl ComplianceTotals {
    pub fn from_states(states: impl IntoIterator<Item = ComplianceState>) -> Self {
        let mut totals = ComplianceTotals::default();
        for state in states {
            totals.total_blocks += 1;
            match state {
                ComplianceState::Tomada => totals.tomada += 1,
                ComplianceState::NoTomada => totals.no_tomada += 1,
                ComplianceState::EnCurso => totals.en_curso += 1,
                ComplianceState::Programada => totals.programada += 1,
            }
        }
        let due = totals.tomada + totals.no_tomada;
        if due > 0 {
            totals.compliance_percentage = Some(totals.tomada as f64 * 100.0 / due as f64);
        }
        totals
    }
}

/// A teacher's attendance compliance on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub teacher_id: TeacherId,
    pub school_year_id: SchoolYearId,
    pub date: NaiveDate,
    pub is_business_day: bool,
    pub day_off: Option<DayOff>,
    pub blocks: Vec<ComplianceBlock>,
    pub summary: ComplianceTotals,
}

/// Dashboard state of one of today's classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodayState {
    Pendiente,
    Disponible,
    Expirada,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayClass {
    pub block_id: BlockId,
    pub course_id: CourseId,
    pub course_name: String,
    pub block_number: u32,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub subject_id: Option<SubjectId>,
    pub subject_name: Option<String>,
    pub state: TodayState,
    pub attendance_taken: bool,
}

/// A teacher's classes for the current day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayClasses {
    pub teacher_id: TeacherId,
    pub school_year_id: SchoolYearId,
    pub date: NaiveDate,
    pub is_business_day: bool,
    pub day_off: Option<DayOff>,
    pub classes: Vec<TodayClass>,
}
