//! Putting teachers on class blocks without double-booking them.

use log::{debug, info, warn};

use super::context::{ensure_class_block, EngineContext};
use super::error::{RuleCode, ServiceError, ServiceResult};
use super::locks::LockKey;
use crate::models::{BlockId, CourseId, SchoolYearId, TeacherId, TimeBlock};
use crate::routes::assignment::AssignmentResult;

/// First active class block of the year, other than `block`, that `teacher_id`
/// holds on the same weekday at an overlapping time.
pub(crate) async fn find_collision(
    ctx: &EngineContext,
    school_year_id: SchoolYearId,
    block: &TimeBlock,
    teacher_id: TeacherId,
) -> ServiceResult<Option<TimeBlock>> {
    let candidates = ctx
        .repository
        .active_class_blocks_for_year(school_year_id, Some(block.weekday))
        .await?;
    Ok(first_collision(&candidates, block, teacher_id).cloned())
}

pub(crate) fn first_collision<'a>(
    candidates: &'a [TimeBlock],
    block: &TimeBlock,
    teacher_id: TeacherId,
) -> Option<&'a TimeBlock> {
    candidates.iter().find(|other| {
        other.id != block.id
            && other.is_active_class()
            && other.teacher_id == Some(teacher_id)
            && other.overlaps(block)
    })
}

/// Assign `teacher_id` to a class block of `course_id` that already has a subject.
pub async fn assign_teacher(
    ctx: &EngineContext,
    course_id: CourseId,
    block_id: BlockId,
    teacher_id: TeacherId,
) -> ServiceResult<AssignmentResult> {
    let today = ctx.clock.today();
    let course = ctx.load_editable_course(course_id, today).await?;

    let _locks = ctx
        .locks
        .acquire([LockKey::Block(block_id), LockKey::Teacher(teacher_id)])
        .await;

    let block = ctx.load_course_block(&course, block_id).await?;
    ensure_class_block(&block)?;
    let subject_id = block.subject_id.ok_or_else(|| {
        ServiceError::rule(
            RuleCode::BloqueSinMateriaParaProfesor,
            format!("block {} needs a subject before a teacher", block.id),
        )
    })?;

    if block.teacher_id == Some(teacher_id) {
        debug!("Block {} already taught by teacher {}", block.id, teacher_id);
        return Ok(AssignmentResult::unchanged(block));
    }

    let teacher = ctx
        .repository
        .get_teacher(teacher_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("teacher", teacher_id))?;
    if !teacher.active {
        return Err(ServiceError::rule(
            RuleCode::ProfesorInactivo,
            format!("teacher {} is not active", teacher.name),
        ));
    }
    if !teacher.teaches(subject_id) {
        return Err(ServiceError::rule(
            RuleCode::ProfesorNoEnsenaMateria,
            format!("teacher {} does not teach subject {}", teacher.name, subject_id),
        ));
    }

    if let Some(other) = find_collision(ctx, course.school_year_id, &block, teacher.id).await? {
        warn!(
            "Teacher {} collides with block {} of course {} on weekday {}",
            teacher.id, other.id, other.course_id, other.weekday
        );
        return Err(ServiceError::rule(
            RuleCode::ProfesorColisionHorario,
            format!(
                "teacher {} already teaches block {} of course {} at an overlapping time",
                teacher.name, other.id, other.course_id
            ),
        ));
    }

    let updated = ctx
        .repository
        .update_block_assignment(block.id, Some(subject_id), Some(teacher.id))
        .await?;
    info!(
        "Assigned teacher {} to block {} of course {}",
        teacher.id, updated.id, course.id
    );
    Ok(AssignmentResult::changed(updated))
}

/// Clear the teacher of a class block, keeping its subject.
pub async fn remove_teacher(
    ctx: &EngineContext,
    course_id: CourseId,
    block_id: BlockId,
) -> ServiceResult<AssignmentResult> {
    let today = ctx.clock.today();
    let course = ctx.load_editable_course(course_id, today).await?;

    let _locks = ctx.locks.acquire([LockKey::Block(block_id)]).await;

    let block = ctx.load_course_block(&course, block_id).await?;
    ensure_class_block(&block)?;

    if block.teacher_id.is_none() {
        debug!("Block {} has no teacher to remove", block.id);
        return Ok(AssignmentResult::unchanged(block));
    }

    let updated = ctx
        .repository
        .update_block_assignment(block.id, block.subject_id, None)
        .await?;
    info!("Removed teacher from block {} of course {}", updated.id, course.id);
    Ok(AssignmentResult {
        block: updated,
        changed: true,
        teacher_cleared: true,
    })
}

#[cfg(test)]
#[path = "teacher_assignment_tests.rs"]
mod teacher_assignment_tests;
