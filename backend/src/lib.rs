//! # Jornada Backend
//!
//! Daily class-schedule engine for schools.
//!
//! For each course and weekday a school defines a "jornada": an ordered,
//! contiguous sequence of time blocks (classes, recesses, lunch). Class blocks
//! then receive a subject and a teacher, subject to the course curriculum and
//! the teacher's timetable across the whole school year. Attendance taken
//! against those blocks feeds a per-teacher compliance report.
//!
//! ## Architecture
//!
//! - [`models`]: Domain entities, identifiers and time helpers
//! - [`db`]: Repository traits, the in-memory repository and seed loading
//! - [`services`]: Schedule operations, availability, summaries and compliance
//! - [`routes`]: Route constants and the result types each endpoint returns
//! - [`api`]: Flat re-export of the public result types
//! - [`config`]: TOML and environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Consistency
//!
//! Every mutating operation reads the clock once, takes keyed locks through
//! [`services::LockManager`] and commits a single repository write, so a
//! rejected operation never leaves partial state behind.

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
