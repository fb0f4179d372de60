//! Replicating one weekday's block shape onto other weekdays.

use std::collections::BTreeSet;

use log::info;

use super::context::{ensure_weekday, EngineContext};
use super::error::{RuleCode, ServiceError, ServiceResult};
use super::locks::LockKey;
use super::schedule_builder::validate_day_layout;
use crate::models::{is_valid_weekday, CourseId, DayLayout, TimeBlock};
use crate::routes::schedule::CourseSchedule;

/// Copy the layout of `source_weekday` onto every destination weekday.
///
/// Only `(number, start, end, type)` travels; copied blocks start without a
/// subject or teacher. All destinations are written together, so either every
/// destination is replaced or none is.
pub async fn copy_day(
    ctx: &EngineContext,
    course_id: CourseId,
    source_weekday: u8,
    destination_weekdays: &[u8],
) -> ServiceResult<CourseSchedule> {
    let today = ctx.clock.today();
    let course = ctx.load_editable_course(course_id, today).await?;
    ensure_weekday(source_weekday)?;

    let keys = std::iter::once(source_weekday)
        .chain(destination_weekdays.iter().copied().filter(|&w| is_valid_weekday(w)))
        .map(|weekday| LockKey::CourseDay(course.id, weekday));
    let _locks = ctx.locks.acquire(keys).await;

    let source = ctx
        .repository
        .active_blocks_for_day(course.id, source_weekday)
        .await?;
    if source.is_empty() {
        return Err(ServiceError::rule(
            RuleCode::DiaSinHorario,
            "source day has no configured schedule",
        ));
    }

    if destination_weekdays.is_empty() {
        return Err(ServiceError::rule(
            RuleCode::DiaDestinoInvalido,
            "at least one destination weekday is required",
        ));
    }
    let mut destinations = BTreeSet::new();
    for &weekday in destination_weekdays {
        if !is_valid_weekday(weekday) || weekday == source_weekday {
            return Err(ServiceError::rule(
                RuleCode::DiaDestinoInvalido,
                format!(
                    "destination weekday {} is invalid for source weekday {}",
                    weekday, source_weekday
                ),
            ));
        }
        destinations.insert(weekday);
    }

    let shape: Vec<_> = source.iter().map(TimeBlock::spec).collect();
    let layouts: Vec<DayLayout> = destinations
        .iter()
        .map(|&weekday| DayLayout {
            weekday,
            blocks: shape.clone(),
        })
        .collect();
    for layout in &layouts {
        validate_day_layout(layout.weekday, &layout.blocks, &ctx.school_day)?;
    }

    ctx.repository.replace_day_blocks(course.id, &layouts).await?;
    info!(
        "Copied weekday {} of course {} to {:?}",
        source_weekday, course.id, destinations
    );

    let blocks = ctx.repository.active_blocks_for_course(course.id).await?;
    Ok(CourseSchedule::from_blocks(course.id, blocks))
}

#[cfg(test)]
#[path = "schedule_copier_tests.rs"]
mod schedule_copier_tests;
