//! Putting subjects on class blocks within the curriculum quota.

use log::{debug, info, warn};

use super::context::{ensure_class_block, EngineContext};
use super::error::{RuleCode, ServiceError, ServiceResult};
use super::locks::LockKey;
use crate::models::{BlockId, CourseId, SubjectId, TimeBlock};
use crate::routes::assignment::AssignmentResult;

/// Minutes of `subject_id` on active class blocks, leaving out `except`.
pub(crate) fn subject_minutes(
    blocks: &[TimeBlock],
    subject_id: SubjectId,
    except: Option<BlockId>,
) -> i64 {
    blocks
        .iter()
        .filter(|b| b.is_active_class() && b.subject_id == Some(subject_id))
        .filter(|b| Some(b.id) != except)
        .map(TimeBlock::duration_minutes)
        .sum()
}

/// Assign `subject_id` to a class block of `course_id`.
///
/// The course's minutes for the subject, counting this block, may not exceed
/// the curriculum quota. A teacher already on the block stays only when they
/// are still active and also teach the new subject.
pub async fn assign_subject(
    ctx: &EngineContext,
    course_id: CourseId,
    block_id: BlockId,
    subject_id: SubjectId,
) -> ServiceResult<AssignmentResult> {
    let today = ctx.clock.today();
    let course = ctx.load_editable_course(course_id, today).await?;

    let _locks = ctx
        .locks
        .acquire([
            LockKey::Block(block_id),
            LockKey::CourseSubject(course.id, subject_id),
            LockKey::Subject(subject_id),
        ])
        .await;

    let block = ctx.load_course_block(&course, block_id).await?;
    ensure_class_block(&block)?;

    if block.subject_id == Some(subject_id) {
        debug!("Block {} already holds subject {}", block.id, subject_id);
        return Ok(AssignmentResult::unchanged(block));
    }

    let subject = ctx
        .repository
        .subject_active_by_id_locked(subject_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("subject", subject_id))?;

    let entry = ctx
        .repository
        .active_curriculum_entry(subject.id, course.grade_id, course.school_year_id)
        .await?
        .ok_or_else(|| {
            ServiceError::rule(
                RuleCode::MateriaNoEnMalla,
                format!(
                    "{} is not in the curriculum of course {}",
                    subject.name, course.name
                ),
            )
        })?;

    let course_blocks = ctx.repository.active_blocks_for_course(course.id).await?;
    let assigned = subject_minutes(&course_blocks, subject.id, Some(block.id))
        + block.duration_minutes();
    let quota = entry.quota_minutes();
    if assigned > quota {
        warn!(
            "Quota exceeded for subject {} in course {}: {} > {} minutes",
            subject.id, course.id, assigned, quota
        );
        return Err(ServiceError::rule(
            RuleCode::MateriaExcedeMinutosMalla,
            format!(
                "{} would have {} minutes in course {}, quota is {}",
                subject.name, assigned, course.name, quota
            ),
        ));
    }

    let teacher_id = match block.teacher_id {
        Some(teacher_id) => ctx
            .repository
            .get_teacher(teacher_id)
            .await?
            .filter(|t| t.active && t.teaches(subject.id))
            .map(|t| t.id),
        None => None,
    };
    let teacher_cleared = block.teacher_id.is_some() && teacher_id.is_none();

    let updated = ctx
        .repository
        .update_block_assignment(block.id, Some(subject.id), teacher_id)
        .await?;
    info!(
        "Assigned subject {} to block {} of course {} ({} of {} minutes)",
        subject.id, updated.id, course.id, assigned, quota
    );

    Ok(AssignmentResult {
        block: updated,
        changed: true,
        teacher_cleared,
    })
}

/// Clear the subject of a class block. The teacher goes with it.
pub async fn remove_subject(
    ctx: &EngineContext,
    course_id: CourseId,
    block_id: BlockId,
) -> ServiceResult<AssignmentResult> {
    let today = ctx.clock.today();
    let course = ctx.load_editable_course(course_id, today).await?;

    let _locks = ctx.locks.acquire([LockKey::Block(block_id)]).await;

    let block = ctx.load_course_block(&course, block_id).await?;
    ensure_class_block(&block)?;

    if block.subject_id.is_none() && block.teacher_id.is_none() {
        debug!("Block {} has no subject to remove", block.id);
        return Ok(AssignmentResult::unchanged(block));
    }

    let teacher_cleared = block.teacher_id.is_some();
    let updated = ctx
        .repository
        .update_block_assignment(block.id, None, None)
        .await?;
    info!("Removed subject from block {} of course {}", updated.id, course.id);

    Ok(AssignmentResult {
        block: updated,
        changed: true,
        teacher_cleared,
    })
}

#[cfg(test)]
#[path = "subject_assignment_tests.rs"]
mod subject_assignment_tests;
