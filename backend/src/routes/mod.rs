pub mod assignment;
pub mod availability;
pub mod compliance;
pub mod schedule;
pub mod summaries;

/// Liveness probe.
pub const HEALTH: &str = "/health";
