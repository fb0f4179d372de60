//! Clearing a course weekday.

use log::info;

use super::context::{ensure_weekday, EngineContext};
use super::error::{RuleCode, ServiceError, ServiceResult};
use super::locks::LockKey;
use crate::models::CourseId;
use crate::routes::schedule::EraseResult;

/// Deactivate every active block of a course weekday.
///
/// Erasing a day that has nothing configured is a rule violation, not a no-op.
pub async fn erase_day(
    ctx: &EngineContext,
    course_id: CourseId,
    weekday: u8,
) -> ServiceResult<EraseResult> {
    let today = ctx.clock.today();
    let course = ctx.load_editable_course(course_id, today).await?;
    ensure_weekday(weekday)?;

    let _locks = ctx
        .locks
        .acquire([LockKey::CourseDay(course.id, weekday)])
        .await;

    let deactivated = ctx
        .repository
        .deactivate_day_blocks(course.id, weekday)
        .await?;
    if deactivated == 0 {
        return Err(ServiceError::rule(
            RuleCode::DiaSinHorario,
            "no schedule configured for this day",
        ));
    }

    info!(
        "Erased weekday {} of course {} ({} blocks)",
        weekday, course.id, deactivated
    );
    Ok(EraseResult {
        course_id: course.id,
        weekday,
        deactivated_blocks: deactivated,
    })
}
