//! School year entity and its derived lifecycle phase.
//!
//! The phase is never stored: it is a pure function of the calendar dates and
//! the current day, so it cannot drift from the clock.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::school::SchoolYearId;

/// Lifecycle phase of a school year.
///
/// Variants are declared in chronological order, so `Ord` follows the
/// progression `FUTURO < PLANIFICACION < ACTIVO < CERRADO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum YearState {
    Futuro,
    Planificacion,
    Activo,
    Cerrado,
}

impl YearState {
    pub fn as_str(&self) -> &'static str {
        match self {
            YearState::Futuro => "FUTURO",
            YearState::Planificacion => "PLANIFICACION",
            YearState::Activo => "ACTIVO",
            YearState::Cerrado => "CERRADO",
        }
    }

    /// Whether schedule data owned by a year in this phase may still change.
    pub fn is_editable(&self) -> bool {
        !matches!(self, YearState::Cerrado)
    }
}

impl std::fmt::Display for YearState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute the lifecycle phase of a school year on `today`.
pub fn year_state(
    today: NaiveDate,
    planning_start: NaiveDate,
    term_start: NaiveDate,
    term_end: NaiveDate,
) -> YearState {
    if today < planning_start {
        YearState::Futuro
    } else if today < term_start {
        YearState::Planificacion
    } else if today <= term_end {
        YearState::Activo
    } else {
        YearState::Cerrado
    }
}

/// A school year with its planning and term calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolYear {
    pub id: SchoolYearId,
    pub year: i32,
    pub planning_start: NaiveDate,
    pub term_start: NaiveDate,
    pub term_end: NaiveDate,
}

impl SchoolYear {
    /// Build a school year, checking `planning_start <= term_start <= term_end`.
    pub fn new(
        id: SchoolYearId,
        year: i32,
        planning_start: NaiveDate,
        term_start: NaiveDate,
        term_end: NaiveDate,
    ) -> Result<Self, String> {
        let year = Self {
            id,
            year,
            planning_start,
            term_start,
            term_end,
        };
        year.check_calendar()?;
        Ok(year)
    }

    /// Validate the calendar ordering of an already-built value.
    pub fn check_calendar(&self) -> Result<(), String> {
        if self.planning_start > self.term_start {
            return Err(format!(
                "School year {}: planning start {} is after term start {}",
                self.year, self.planning_start, self.term_start
            ));
        }
        if self.term_start > self.term_end {
            return Err(format!(
                "School year {}: term start {} is after term end {}",
                self.year, self.term_start, self.term_end
            ));
        }
        Ok(())
    }

    /// Lifecycle phase on `today`.
    pub fn state_on(&self, today: NaiveDate) -> YearState {
        year_state(today, self.planning_start, self.term_start, self.term_end)
    }

    /// A year is closed once `today` is past the end of its term.
    pub fn is_closed_on(&self, today: NaiveDate) -> bool {
        today > self.term_end
    }
}
