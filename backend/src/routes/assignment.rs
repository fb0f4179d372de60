use serde::{Deserialize, Serialize};

use crate::models::TimeBlock;

// =========================================================
// Block assignment types + routes
// =========================================================

/// Route assigning or clearing a block's subject (PUT / DELETE).
pub const BLOCK_SUBJECT: &str = "/v1/courses/{course_id}/blocks/{block_id}/subject";
/// Route assigning or clearing a block's teacher (PUT / DELETE).
pub const BLOCK_TEACHER: &str = "/v1/courses/{course_id}/blocks/{block_id}/teacher";

/// Block state after an assignment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentResult {
    pub block: TimeBlock,
    /// `false` when the request matched the current state and nothing was written.
    pub changed: bool,
    /// Set when assigning a subject dropped a teacher who does not teach it.
    pub teacher_cleared: bool,
}

impl AssignmentResult {
    pub fn unchanged(block: TimeBlock) -> Self {
        Self {
            block,
            changed: false,
            teacher_cleared: false,
        }
    }

    pub fn changed(block: TimeBlock) -> Self {
        Self {
            block,
            changed: true,
            teacher_cleared: false,
        }
    }
}
