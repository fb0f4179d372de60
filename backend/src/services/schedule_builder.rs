//! Saving and reading one weekday's block layout.
//!
//! A saved day replaces the previous one wholesale: every active block of the
//! (course, weekday) pair is deactivated and the new layout is inserted as a
//! fresh generation in a single repository write.

use log::{debug, info};

use super::context::{ensure_weekday, EngineContext};
use super::error::{RuleCode, ServiceError, ServiceResult};
use super::locks::LockKey;
use crate::config::SchoolDayWindow;
use crate::models::time::format_clock_time;
use crate::models::{BlockSpec, BlockType, CourseId, DayLayout};
use crate::routes::schedule::{CourseSchedule, DaySummary};

/// Check a day layout against the structural rules, first failure wins.
///
/// Shape errors (weekday range, numbering, times, contiguity) are
/// `ValidationFailed`; composition errors (lunch count, class presence,
/// class at both ends) are business rule violations.
pub fn validate_day_layout(
    weekday: u8,
    blocks: &[BlockSpec],
    window: &SchoolDayWindow,
) -> ServiceResult<()> {
    ensure_weekday(weekday)?;

    if blocks.is_empty() {
        return Err(ServiceError::validation("a day needs at least one block"));
    }

    for (index, block) in blocks.iter().enumerate() {
        let expected = index as u32 + 1;
        if block.number != expected {
            return Err(ServiceError::validation(format!(
                "block numbers must run 1..{} in order; position {} has number {}",
                blocks.len(),
                expected,
                block.number
            )));
        }
    }

    for block in blocks {
        if block.end <= block.start {
            return Err(ServiceError::validation(format!(
                "block {} ends at {} before it starts at {}",
                block.number,
                format_clock_time(block.end),
                format_clock_time(block.start)
            )));
        }
    }

    for block in blocks {
        if !window.contains(block.start, block.end) {
            return Err(ServiceError::validation(format!(
                "block {} ({}-{}) is outside the school day {}-{}",
                block.number,
                format_clock_time(block.start),
                format_clock_time(block.end),
                format_clock_time(window.opens_at),
                format_clock_time(window.closes_at)
            )));
        }
    }

    for pair in blocks.windows(2) {
        if pair[0].end != pair[1].start {
            return Err(ServiceError::validation(format!(
                "block {} ends at {} but block {} starts at {}",
                pair[0].number,
                format_clock_time(pair[0].end),
                pair[1].number,
                format_clock_time(pair[1].start)
            )));
        }
    }

    let lunches = blocks
        .iter()
        .filter(|b| b.block_type == BlockType::Almuerzo)
        .count();
    if lunches > 1 {
        return Err(ServiceError::rule(
            RuleCode::JornadaMultiplesAlmuerzos,
            "only one ALMUERZO block per day",
        ));
    }

    if !blocks.iter().any(|b| b.block_type == BlockType::Clase) {
        return Err(ServiceError::rule(
            RuleCode::JornadaSinClases,
            "a day needs at least one CLASE block",
        ));
    }

    // Non-empty was checked above.
    let first = &blocks[0];
    let last = &blocks[blocks.len() - 1];
    if first.block_type != BlockType::Clase || last.block_type != BlockType::Clase {
        return Err(ServiceError::rule(
            RuleCode::JornadaExtremoNoEsClase,
            "the first and last blocks of a day must be CLASE",
        ));
    }

    Ok(())
}

/// Replace the layout of one weekday of a course.
pub async fn save_day(
    ctx: &EngineContext,
    course_id: CourseId,
    weekday: u8,
    blocks: Vec<BlockSpec>,
) -> ServiceResult<DaySummary> {
    let today = ctx.clock.today();
    let course = ctx.load_editable_course(course_id, today).await?;
    validate_day_layout(weekday, &blocks, &ctx.school_day)?;

    let _locks = ctx
        .locks
        .acquire([LockKey::CourseDay(course.id, weekday)])
        .await;

    let layout = DayLayout { weekday, blocks };
    let inserted = ctx
        .repository
        .replace_day_blocks(course.id, std::slice::from_ref(&layout))
        .await?;

    let summary = DaySummary::from_blocks(weekday, inserted);
    info!(
        "Saved weekday {} of course {}: {} blocks, {} classes",
        weekday,
        course.id,
        summary.blocks.len(),
        summary.class_block_count
    );
    Ok(summary)
}

/// Active layout of one weekday. An unconfigured day comes back empty.
pub async fn get_day(
    ctx: &EngineContext,
    course_id: CourseId,
    weekday: u8,
) -> ServiceResult<DaySummary> {
    let course = ctx.load_course(course_id).await?;
    ensure_weekday(weekday)?;
    let blocks = ctx
        .repository
        .active_blocks_for_day(course.id, weekday)
        .await?;
    debug!(
        "Loaded weekday {} of course {} ({} blocks)",
        weekday,
        course.id,
        blocks.len()
    );
    Ok(DaySummary::from_blocks(weekday, blocks))
}

/// Active layout of every schedulable weekday of a course.
pub async fn get_course_schedule(
    ctx: &EngineContext,
    course_id: CourseId,
) -> ServiceResult<CourseSchedule> {
    let course = ctx.load_course(course_id).await?;
    let blocks = ctx.repository.active_blocks_for_course(course.id).await?;
    Ok(CourseSchedule::from_blocks(course.id, blocks))
}

#[cfg(test)]
#[path = "schedule_builder_tests.rs"]
mod schedule_builder_tests;
