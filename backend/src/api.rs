//! Public API surface of the schedule engine.
//!
//! This file consolidates the result types returned by the services and
//! serialized by the HTTP layer. All types derive Serialize/Deserialize.

pub use crate::routes::assignment::AssignmentResult;
pub use crate::routes::availability::SubjectAvailability;
pub use crate::routes::availability::SubjectOption;
pub use crate::routes::availability::TeacherAvailability;
pub use crate::routes::availability::TeacherConflict;
pub use crate::routes::availability::TeacherOption;
pub use crate::routes::compliance::AttendanceBreakdown;
pub use crate::routes::compliance::ComplianceBlock;
pub use crate::routes::compliance::ComplianceReport;
pub use crate::routes::compliance::ComplianceState;
pub use crate::routes::compliance::ComplianceTotals;
pub use crate::routes::compliance::DayOff;
pub use crate::routes::compliance::TodayClass;
pub use crate::routes::compliance::TodayClasses;
pub use crate::routes::compliance::TodayState;
pub use crate::routes::schedule::CourseSchedule;
pub use crate::routes::schedule::DaySummary;
pub use crate::routes::schedule::EraseResult;
pub use crate::routes::schedule::YearStateInfo;
pub use crate::routes::summaries::BlockRef;
pub use crate::routes::summaries::CoverageStatus;
pub use crate::routes::summaries::SubjectCoverage;
pub use crate::routes::summaries::SubjectSummary;
pub use crate::routes::summaries::TeacherLoad;
pub use crate::routes::summaries::TeacherSummary;

pub use crate::models::{
    BlockId, BlockSpec, BlockType, CourseId, SchoolYearId, SubjectId, TeacherId, TimeBlock,
    YearState,
};
