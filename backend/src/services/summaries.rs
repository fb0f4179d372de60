//! Completion status of a course schedule, by subject and by teacher.

use std::collections::BTreeMap;

use super::context::EngineContext;
use super::error::ServiceResult;
use crate::models::time::pedagogical_hours_ceil;
use crate::models::{CourseId, TeacherId, TimeBlock};
use crate::routes::summaries::{
    BlockRef, CoverageStatus, SubjectCoverage, SubjectSummary, TeacherLoad, TeacherSummary,
};

async fn course_class_blocks(
    ctx: &EngineContext,
    course_id: CourseId,
) -> ServiceResult<Vec<TimeBlock>> {
    Ok(ctx
        .repository
        .active_blocks_for_course(course_id)
        .await?
        .into_iter()
        .filter(TimeBlock::is_active_class)
        .collect())
}

/// How much of each curriculum subject's quota the course schedule covers.
pub async fn subject_summary(
    ctx: &EngineContext,
    course_id: CourseId,
) -> ServiceResult<SubjectSummary> {
    let course = ctx.load_course(course_id).await?;
    let blocks = course_class_blocks(ctx, course.id).await?;
    let entries = ctx
        .repository
        .active_curriculum_entries(course.grade_id, course.school_year_id)
        .await?;

    let mut subjects = Vec::with_capacity(entries.len());
    for entry in entries {
        let subject_blocks: Vec<&TimeBlock> = blocks
            .iter()
            .filter(|b| b.subject_id == Some(entry.subject_id))
            .collect();
        let assigned_minutes: i64 = subject_blocks.iter().map(|b| b.duration_minutes()).sum();
        let quota_minutes = entry.quota_minutes();
        let subject_name = ctx
            .repository
            .get_subject(entry.subject_id)
            .await?
            .map(|s| s.name)
            .unwrap_or_default();
        subjects.push(SubjectCoverage {
            subject_id: entry.subject_id,
            subject_name,
            quota_minutes,
            assigned_minutes,
            block_count: subject_blocks.len(),
            status: CoverageStatus::classify(assigned_minutes, quota_minutes),
        });
    }
    subjects.sort_by(|a, b| a.subject_name.cmp(&b.subject_name));

    let blocks_with_subject = blocks.iter().filter(|b| b.subject_id.is_some()).count();
    Ok(SubjectSummary {
        course_id: course.id,
        subjects,
        total_class_blocks: blocks.len(),
        blocks_with_subject,
        blocks_without_subject: blocks.len() - blocks_with_subject,
    })
}

/// Which class blocks of the course have teachers, grouped by teacher.
pub async fn teacher_summary(
    ctx: &EngineContext,
    course_id: CourseId,
) -> ServiceResult<TeacherSummary> {
    let course = ctx.load_course(course_id).await?;
    let blocks = course_class_blocks(ctx, course.id).await?;

    let mut grouped: BTreeMap<TeacherId, Vec<&TimeBlock>> = BTreeMap::new();
    let mut pending = Vec::new();
    let mut blocks_without_subject = 0;
    for block in &blocks {
        match (block.subject_id, block.teacher_id) {
            (_, Some(teacher_id)) => grouped.entry(teacher_id).or_default().push(block),
            (Some(_), None) => pending.push(BlockRef::from(block)),
            (None, None) => {}
        }
        if block.subject_id.is_none() {
            blocks_without_subject += 1;
        }
    }

    let mut teachers = Vec::with_capacity(grouped.len());
    for (teacher_id, teacher_blocks) in grouped {
        let teacher_name = ctx
            .repository
            .get_teacher(teacher_id)
            .await?
            .map(|t| t.name)
            .unwrap_or_default();
        let assigned_minutes: i64 = teacher_blocks.iter().map(|b| b.duration_minutes()).sum();
        teachers.push(TeacherLoad {
            teacher_id,
            teacher_name,
            assigned_minutes,
            assigned_hours: pedagogical_hours_ceil(assigned_minutes),
            blocks: teacher_blocks.into_iter().map(BlockRef::from).collect(),
        });
    }
    teachers.sort_by(|a, b| a.teacher_name.cmp(&b.teacher_name));

    let blocks_with_teacher = blocks.iter().filter(|b| b.teacher_id.is_some()).count();
    Ok(TeacherSummary {
        course_id: course.id,
        total_class_blocks: blocks.len(),
        blocks_with_teacher,
        blocks_without_teacher: blocks.len() - blocks_with_teacher,
        blocks_with_subject_without_teacher: pending.len(),
        blocks_without_subject,
        teachers,
        pending,
    })
}
