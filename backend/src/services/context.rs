//! Shared collaborators of every schedule operation.

use std::sync::Arc;

use chrono::NaiveDate;
use log::warn;

use super::clock::{Clock, SystemClock};
use super::error::{RuleCode, ServiceError, ServiceResult};
use super::locks::LockManager;
use crate::config::SchoolDayWindow;
use crate::db::repository::FullRepository;
use crate::models::{is_valid_weekday, BlockId, Course, CourseId, SchoolYear, TimeBlock};

/// Repository, clock, lock registry and school-day window, cloned cheaply
/// into every handler.
#[derive(Clone)]
pub struct EngineContext {
    pub repository: Arc<dyn FullRepository>,
    pub clock: Arc<dyn Clock>,
    pub locks: LockManager,
    pub school_day: SchoolDayWindow,
}

impl EngineContext {
    pub fn new(repository: Arc<dyn FullRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            locks: LockManager::new(),
            school_day: SchoolDayWindow::default(),
        }
    }

    /// Context backed by the host wall clock.
    pub fn with_system_clock(repository: Arc<dyn FullRepository>) -> Self {
        Self::new(repository, Arc::new(SystemClock))
    }

    pub fn with_school_day(mut self, school_day: SchoolDayWindow) -> Self {
        self.school_day = school_day;
        self
    }

    pub(crate) async fn load_course(&self, course_id: CourseId) -> ServiceResult<Course> {
        self.repository
            .get_course(course_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("course", course_id))
    }

    pub(crate) async fn load_school_year(&self, course: &Course) -> ServiceResult<SchoolYear> {
        self.repository
            .get_school_year(course.school_year_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("school_year", course.school_year_id))
    }

    /// Load a course and reject the operation when its year is closed on `today`.
    pub(crate) async fn load_editable_course(
        &self,
        course_id: CourseId,
        today: NaiveDate,
    ) -> ServiceResult<Course> {
        let course = self.load_course(course_id).await?;
        let year = self.load_school_year(&course).await?;
        if year.is_closed_on(today) {
            warn!(
                "Rejected change to course {}: school year {} closed on {}",
                course.id, year.year, year.term_end
            );
            return Err(ServiceError::rule(
                RuleCode::AnioEscolarCerrado,
                format!("school year {} is closed", year.year),
            ));
        }
        Ok(course)
    }

    /// Load an active block of `course`. Blocks of other courses and
    /// deactivated rows are reported as missing.
    pub(crate) async fn load_course_block(
        &self,
        course: &Course,
        block_id: BlockId,
    ) -> ServiceResult<TimeBlock> {
        match self.repository.get_block(block_id).await? {
            Some(block) if block.active && block.course_id == course.id => Ok(block),
            _ => Err(ServiceError::not_found("time_block", block_id)),
        }
    }
}

pub(crate) fn ensure_weekday(weekday: u8) -> ServiceResult<()> {
    if !is_valid_weekday(weekday) {
        return Err(ServiceError::validation(format!(
            "weekday must be between 1 and 6, got {}",
            weekday
        )));
    }
    Ok(())
}

pub(crate) fn ensure_class_block(block: &TimeBlock) -> ServiceResult<()> {
    if !block.is_class() {
        return Err(ServiceError::rule(
            RuleCode::BloqueNoEsClase,
            format!("block {} is {}, not CLASE", block.id, block.block_type),
        ));
    }
    Ok(())
}
