use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{
    BlockType, CourseId, SchoolYearId, TimeBlock, YearState, FIRST_WEEKDAY, LAST_WEEKDAY,
};

// =========================================================
// Daily schedule types + routes
// =========================================================

/// Route for the whole week of a course.
pub const COURSE_SCHEDULE: &str = "/v1/courses/{course_id}/schedule";
/// Route for one weekday of a course (GET / PUT / DELETE).
pub const COURSE_DAY: &str = "/v1/courses/{course_id}/schedule/{weekday}";
/// Route copying one weekday onto others.
pub const COPY_DAY: &str = "/v1/courses/{course_id}/schedule/{weekday}/copy";
/// Route reporting a school year's lifecycle phase.
pub const YEAR_STATE: &str = "/v1/school-years/{year_id}/state";

/// One weekday of a course as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub weekday: u8,
    pub blocks: Vec<TimeBlock>,
    pub class_block_count: usize,
    /// Start of the first block, `None` for an empty day.
    pub day_start: Option<NaiveTime>,
    pub day_end: Option<NaiveTime>,
}

impl DaySummary {
    /// Build a summary from a day's active blocks, ordering them by number.
    pub fn from_blocks(weekday: u8, mut blocks: Vec<TimeBlock>) -> Self {
        blocks.sort_by_key(|b| b.block_number);
        let class_block_count = blocks
            .iter()
            .filter(|b| b.block_type == BlockType::Clase)
            .count();
        let day_start = blocks.first().map(|b| b.start);
        let day_end = blocks.last().map(|b| b.end);
        Self {
            weekday,
            blocks,
            class_block_count,
            day_start,
            day_end,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// All schedulable weekdays of a course, empty days included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSchedule {
    pub course_id: CourseId,
    pub days: Vec<DaySummary>,
}

impl CourseSchedule {
    /// Group a course's active blocks into the six weekdays.
    pub fn from_blocks(course_id: CourseId, blocks: Vec<TimeBlock>) -> Self {
        let days = (FIRST_WEEKDAY..=LAST_WEEKDAY)
            .map(|weekday| {
                let day_blocks = blocks
                    .iter()
                    .filter(|b| b.weekday == weekday)
                    .cloned()
                    .collect();
                DaySummary::from_blocks(weekday, day_blocks)
            })
            .collect();
        Self { course_id, days }
    }

    pub fn day(&self, weekday: u8) -> Option<&DaySummary> {
        self.days.iter().find(|d| d.weekday == weekday)
    }
}

/// Outcome of erasing one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraseResult {
    pub course_id: CourseId,
    pub weekday: u8,
    pub deactivated_blocks: usize,
}

/// Lifecycle phase of a school year as seen on `today`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearStateInfo {
    pub school_year_id: SchoolYearId,
    pub year: i32,
    pub today: NaiveDate,
    pub state: YearState,
    pub editable: bool,
}
