//! Time blocks (bloques horarios) making up a course's daily schedule.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::school::{CourseId, SubjectId, TeacherId};
use super::time::minutes_between;
use crate::define_id_type;

define_id_type!(i64, BlockId);

/// First schedulable weekday (Monday).
pub const FIRST_WEEKDAY: u8 = 1;
/// Last schedulable weekday (Saturday).
pub const LAST_WEEKDAY: u8 = 6;

/// Whether `weekday` is a schedulable weekday number (1 = Monday .. 6 = Saturday).
pub fn is_valid_weekday(weekday: u8) -> bool {
    (FIRST_WEEKDAY..=LAST_WEEKDAY).contains(&weekday)
}

/// ISO weekday number of a date (1 = Monday .. 7 = Sunday).
pub fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().number_from_monday() as u8
}

/// Monday through Friday.
pub fn is_business_day(date: NaiveDate) -> bool {
    weekday_number(date) <= 5
}

/// Kind of slot a block represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    Clase,
    Recreo,
    Almuerzo,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Clase => "CLASE",
            BlockType::Recreo => "RECREO",
            BlockType::Almuerzo => "ALMUERZO",
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CLASE" => Ok(BlockType::Clase),
            "RECREO" => Ok(BlockType::Recreo),
            "ALMUERZO" => Ok(BlockType::Almuerzo),
            other => Err(format!("Unknown block type '{}'", other)),
        }
    }
}

/// Layout of one block as submitted when a day is saved or copied.
///
/// Carries shape only: subject and teacher are never part of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSpec {
    pub number: u32,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub block_type: BlockType,
}

impl BlockSpec {
    pub fn new(number: u32, start: NaiveTime, end: NaiveTime, block_type: BlockType) -> Self {
        Self {
            number,
            start,
            end,
            block_type,
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        minutes_between(self.start, self.end)
    }
}

/// The full block layout for one weekday of a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLayout {
    pub weekday: u8,
    pub blocks: Vec<BlockSpec>,
}

/// One persisted block row.
///
/// Rows are append-only with respect to their layout: re-saving a day
/// deactivates the previous generation and inserts a fresh one. Only the
/// subject and teacher fields change on an active row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub id: BlockId,
    pub course_id: CourseId,
    pub weekday: u8,
    pub block_number: u32,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub block_type: BlockType,
    pub subject_id: Option<SubjectId>,
    pub teacher_id: Option<TeacherId>,
    pub active: bool,
    /// Save generation of the (course, weekday) pair this row belongs to.
    #[serde(default)]
    pub generation: u64,
}

impl TimeBlock {
    pub fn duration_minutes(&self) -> i64 {
        minutes_between(self.start, self.end)
    }

    pub fn is_class(&self) -> bool {
        self.block_type == BlockType::Clase
    }

    pub fn is_active_class(&self) -> bool {
        self.active && self.is_class()
    }

    /// Shape of this block, without assignments.
    pub fn spec(&self) -> BlockSpec {
        BlockSpec::new(self.block_number, self.start, self.end, self.block_type)
    }

    /// Whether this block's time range overlaps `other`'s on the same weekday.
    pub fn overlaps(&self, other: &TimeBlock) -> bool {
        self.weekday == other.weekday
            && super::time::ranges_overlap(self.start, self.end, other.start, other.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn block(weekday: u8, start: NaiveTime, end: NaiveTime) -> TimeBlock {
        TimeBlock {
            id: BlockId::new(1),
            course_id: CourseId::new(1),
            weekday,
            block_number: 1,
            start,
            end,
            block_type: BlockType::Clase,
            subject_id: None,
            teacher_id: None,
            active: true,
            generation: 1,
        }
    }

    #[test]
    fn test_block_type_parse_is_case_insensitive() {
        assert_eq!("clase".parse::<BlockType>().unwrap(), BlockType::Clase);
        assert_eq!(" Recreo ".parse::<BlockType>().unwrap(), BlockType::Recreo);
        assert_eq!("ALMUERZO".parse::<BlockType>().unwrap(), BlockType::Almuerzo);
        assert!("TALLER".parse::<BlockType>().is_err());
    }

    #[test]
    fn test_weekday_helpers() {
        assert!(!is_valid_weekday(0));
        assert!(is_valid_weekday(1));
        assert!(is_valid_weekday(6));
        assert!(!is_valid_weekday(7));

        // 2025-03-03 is a Monday.
        let monday = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert_eq!(weekday_number(monday), 1);
        assert!(is_business_day(monday));
        let saturday = NaiveDate::from_ymd_opt(2025, 3, 8).unwrap();
        assert_eq!(weekday_number(saturday), 6);
        assert!(!is_business_day(saturday));
        assert!(!is_business_day(saturday.succ_opt().unwrap()));
    }

    #[test]
    fn test_overlap_requires_same_weekday() {
        let a = block(1, t(8, 0), t(8, 45));
        let b = block(1, t(8, 30), t(9, 15));
        let c = block(2, t(8, 30), t(9, 15));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_spec_drops_assignments() {
        let mut b = block(3, t(10, 0), t(10, 45));
        b.subject_id = Some(SubjectId::new(9));
        b.teacher_id = Some(TeacherId::new(4));
        let spec = b.spec();
        assert_eq!(spec, BlockSpec::new(1, t(10, 0), t(10, 45), BlockType::Clase));
        assert_eq!(spec.duration_minutes(), 45);
    }
}
