//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::routes::{assignment, availability, compliance, schedule, summaries, HEALTH};

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(HEALTH, get(handlers::health_check))
        // Day layouts
        .route(schedule::COURSE_SCHEDULE, get(handlers::get_course_schedule))
        .route(
            schedule::COURSE_DAY,
            get(handlers::get_day)
                .put(handlers::save_day)
                .delete(handlers::erase_day),
        )
        .route(schedule::COPY_DAY, post(handlers::copy_day))
        .route(schedule::YEAR_STATE, get(handlers::year_state))
        // Block assignments
        .route(
            assignment::BLOCK_SUBJECT,
            put(handlers::assign_subject).delete(handlers::remove_subject),
        )
        .route(
            assignment::BLOCK_TEACHER,
            put(handlers::assign_teacher).delete(handlers::remove_teacher),
        )
        .route(
            availability::AVAILABLE_SUBJECTS,
            get(handlers::available_subjects),
        )
        .route(
            availability::AVAILABLE_TEACHERS,
            get(handlers::available_teachers),
        )
        // Summaries and reports
        .route(summaries::SUBJECT_SUMMARY, get(handlers::subject_summary))
        .route(summaries::TEACHER_SUMMARY, get(handlers::teacher_summary))
        .route(compliance::TEACHER_COMPLIANCE, get(handlers::teacher_compliance))
        .route(compliance::TEACHER_CLASSES_TODAY, get(handlers::classes_today))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
