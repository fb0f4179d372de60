//! Data Transfer Objects for the HTTP API.
//!
//! Request bodies and query strings are declared here. Response bodies are the
//! service result types re-exported from [`crate::api`].

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::AppError;
use crate::models::time::parse_clock_time;
use crate::models::{BlockSpec, BlockType, SchoolYearId, SubjectId, TeacherId};

/// One block of a day layout as sent by the client (`"08:00"`, `"CLASE"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockSpecDto {
    pub number: u32,
    pub start: String,
    pub end: String,
    pub block_type: String,
}

impl BlockSpecDto {
    pub fn parse(&self) -> Result<BlockSpec, AppError> {
        let time = |value: &str| {
            parse_clock_time(value).ok_or_else(|| {
                AppError::BadRequest(format!(
                    "block {}: invalid time '{}', expected HH:MM",
                    self.number, value
                ))
            })
        };
        let block_type = BlockType::from_str(&self.block_type)
            .map_err(|e| AppError::BadRequest(format!("block {}: {}", self.number, e)))?;
        Ok(BlockSpec::new(
            self.number,
            time(&self.start)?,
            time(&self.end)?,
            block_type,
        ))
    }
}

/// Request body for replacing one weekday layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveDayRequest {
    pub blocks: Vec<BlockSpecDto>,
}

impl SaveDayRequest {
    pub fn into_specs(self) -> Result<Vec<BlockSpec>, AppError> {
        self.blocks.iter().map(BlockSpecDto::parse).collect()
    }
}

/// Request body for copying a weekday layout onto other weekdays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyDayRequest {
    pub destination_weekdays: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignSubjectRequest {
    pub subject_id: SubjectId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignTeacherRequest {
    pub teacher_id: TeacherId,
}

/// Query parameters of the compliance endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceQuery {
    pub date: NaiveDate,
    pub school_year_id: SchoolYearId,
}

/// Query parameters of the classes-today endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodayQuery {
    pub school_year_id: SchoolYearId,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository connection status
    pub database: String,
}
