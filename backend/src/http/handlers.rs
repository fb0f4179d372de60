//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer. Handlers only translate between JSON and service arguments.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{
    AssignSubjectRequest, AssignTeacherRequest, ComplianceQuery, CopyDayRequest, HealthResponse,
    SaveDayRequest, TodayQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{
    AssignmentResult, BlockId, ComplianceReport, CourseId, CourseSchedule, DaySummary,
    EraseResult, SchoolYearId, SubjectAvailability, SubjectSummary, TeacherAvailability,
    TeacherId, TeacherSummary, TodayClasses, YearStateInfo,
};
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.engine.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Day layouts
// =============================================================================

/// GET /v1/courses/{course_id}/schedule
pub async fn get_course_schedule(
    State(state): State<AppState>,
    Path(course_id): Path<CourseId>,
) -> HandlerResult<CourseSchedule> {
    let schedule = services::get_course_schedule(&state.engine, course_id).await?;
    Ok(Json(schedule))
}

/// GET /v1/courses/{course_id}/schedule/{weekday}
pub async fn get_day(
    State(state): State<AppState>,
    Path((course_id, weekday)): Path<(CourseId, u8)>,
) -> HandlerResult<DaySummary> {
    let day = services::get_day(&state.engine, course_id, weekday).await?;
    Ok(Json(day))
}

/// PUT /v1/courses/{course_id}/schedule/{weekday}
///
/// Replace the whole layout of one weekday.
pub async fn save_day(
    State(state): State<AppState>,
    Path((course_id, weekday)): Path<(CourseId, u8)>,
    Json(request): Json<SaveDayRequest>,
) -> HandlerResult<DaySummary> {
    let specs = request.into_specs()?;
    let day = services::save_day(&state.engine, course_id, weekday, specs).await?;
    Ok(Json(day))
}

/// DELETE /v1/courses/{course_id}/schedule/{weekday}
pub async fn erase_day(
    State(state): State<AppState>,
    Path((course_id, weekday)): Path<(CourseId, u8)>,
) -> HandlerResult<EraseResult> {
    let result = services::erase_day(&state.engine, course_id, weekday).await?;
    Ok(Json(result))
}

/// POST /v1/courses/{course_id}/schedule/{weekday}/copy
pub async fn copy_day(
    State(state): State<AppState>,
    Path((course_id, weekday)): Path<(CourseId, u8)>,
    Json(request): Json<CopyDayRequest>,
) -> HandlerResult<CourseSchedule> {
    let schedule = services::copy_day(
        &state.engine,
        course_id,
        weekday,
        &request.destination_weekdays,
    )
    .await?;
    Ok(Json(schedule))
}

// =============================================================================
// Block assignments
// =============================================================================

/// PUT /v1/courses/{course_id}/blocks/{block_id}/subject
pub async fn assign_subject(
    State(state): State<AppState>,
    Path((course_id, block_id)): Path<(CourseId, BlockId)>,
    Json(request): Json<AssignSubjectRequest>,
) -> HandlerResult<AssignmentResult> {
    let result =
        services::assign_subject(&state.engine, course_id, block_id, request.subject_id).await?;
    Ok(Json(result))
}

/// DELETE /v1/courses/{course_id}/blocks/{block_id}/subject
pub async fn remove_subject(
    State(state): State<AppState>,
    Path((course_id, block_id)): Path<(CourseId, BlockId)>,
) -> HandlerResult<AssignmentResult> {
    let result = services::remove_subject(&state.engine, course_id, block_id).await?;
    Ok(Json(result))
}

/// PUT /v1/courses/{course_id}/blocks/{block_id}/teacher
pub async fn assign_teacher(
    State(state): State<AppState>,
    Path((course_id, block_id)): Path<(CourseId, BlockId)>,
    Json(request): Json<AssignTeacherRequest>,
) -> HandlerResult<AssignmentResult> {
    let result =
        services::assign_teacher(&state.engine, course_id, block_id, request.teacher_id).await?;
    Ok(Json(result))
}

/// DELETE /v1/courses/{course_id}/blocks/{block_id}/teacher
pub async fn remove_teacher(
    State(state): State<AppState>,
    Path((course_id, block_id)): Path<(CourseId, BlockId)>,
) -> HandlerResult<AssignmentResult> {
    let result = services::remove_teacher(&state.engine, course_id, block_id).await?;
    Ok(Json(result))
}

/// GET /v1/courses/{course_id}/blocks/{block_id}/available-subjects
pub async fn available_subjects(
    State(state): State<AppState>,
    Path((course_id, block_id)): Path<(CourseId, BlockId)>,
) -> HandlerResult<SubjectAvailability> {
    let data = services::available_subjects(&state.engine, course_id, block_id).await?;
    Ok(Json(data))
}

/// GET /v1/courses/{course_id}/blocks/{block_id}/available-teachers
pub async fn available_teachers(
    State(state): State<AppState>,
    Path((course_id, block_id)): Path<(CourseId, BlockId)>,
) -> HandlerResult<TeacherAvailability> {
    let data = services::available_teachers(&state.engine, course_id, block_id).await?;
    Ok(Json(data))
}

// =============================================================================
// Summaries and reports
// =============================================================================

/// GET /v1/courses/{course_id}/summary/subjects
pub async fn subject_summary(
    State(state): State<AppState>,
    Path(course_id): Path<CourseId>,
) -> HandlerResult<SubjectSummary> {
    let summary = services::subject_summary(&state.engine, course_id).await?;
    Ok(Json(summary))
}

/// GET /v1/courses/{course_id}/summary/teachers
pub async fn teacher_summary(
    State(state): State<AppState>,
    Path(course_id): Path<CourseId>,
) -> HandlerResult<TeacherSummary> {
    let summary = services::teacher_summary(&state.engine, course_id).await?;
    Ok(Json(summary))
}

/// GET /v1/teachers/{teacher_id}/compliance?date=YYYY-MM-DD&school_year_id=N
pub async fn teacher_compliance(
    State(state): State<AppState>,
    Path(teacher_id): Path<TeacherId>,
    Query(query): Query<ComplianceQuery>,
) -> HandlerResult<ComplianceReport> {
    let report =
        services::compliance_report(&state.engine, teacher_id, query.date, query.school_year_id)
            .await?;
    Ok(Json(report))
}

/// GET /v1/teachers/{teacher_id}/classes-today?school_year_id=N
pub async fn classes_today(
    State(state): State<AppState>,
    Path(teacher_id): Path<TeacherId>,
    Query(query): Query<TodayQuery>,
) -> HandlerResult<TodayClasses> {
    let classes = services::classes_today(&state.engine, teacher_id, query.school_year_id).await?;
    Ok(Json(classes))
}

/// GET /v1/school-years/{year_id}/state
pub async fn year_state(
    State(state): State<AppState>,
    Path(year_id): Path<SchoolYearId>,
) -> HandlerResult<YearStateInfo> {
    let info = services::get_year_state(&state.engine, year_id).await?;
    Ok(Json(info))
}
