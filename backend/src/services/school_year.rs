//! Lifecycle phase of a school year as seen by the engine's clock.

use super::context::EngineContext;
use super::error::{ServiceError, ServiceResult};
use crate::models::SchoolYearId;
use crate::routes::schedule::YearStateInfo;

/// Phase of `year_id` today, and whether its schedules may still change.
pub async fn get_year_state(
    ctx: &EngineContext,
    year_id: SchoolYearId,
) -> ServiceResult<YearStateInfo> {
    let today = ctx.clock.today();
    let year = ctx
        .repository
        .get_school_year(year_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("school_year", year_id))?;
    let state = year.state_on(today);
    Ok(YearStateInfo {
        school_year_id: year.id,
        year: year.year,
        today,
        state,
        editable: state.is_editable(),
    })
}
