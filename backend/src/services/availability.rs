//! Candidate subjects and teachers for a class block.

use std::collections::HashMap;

use super::context::{ensure_class_block, EngineContext};
use super::error::{RuleCode, ServiceError, ServiceResult};
use super::subject_assignment::subject_minutes;
use super::teacher_assignment::first_collision;
use crate::models::time::pedagogical_hours_ceil;
use crate::models::{BlockId, CourseId, TeacherId};
use crate::routes::availability::{
    SubjectAvailability, SubjectOption, TeacherAvailability, TeacherConflict, TeacherOption,
};

/// Curriculum subjects of the block's course, with the quota each has left.
///
/// A subject is assignable when its remaining minutes cover the block, or
/// when it already is the block's subject.
pub async fn available_subjects(
    ctx: &EngineContext,
    course_id: CourseId,
    block_id: BlockId,
) -> ServiceResult<SubjectAvailability> {
    let course = ctx.load_course(course_id).await?;
    let block = ctx.load_course_block(&course, block_id).await?;
    ensure_class_block(&block)?;

    let entries = ctx
        .repository
        .active_curriculum_entries(course.grade_id, course.school_year_id)
        .await?;
    let course_blocks = ctx.repository.active_blocks_for_course(course.id).await?;
    let block_minutes = block.duration_minutes();

    let mut subjects = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(subject) = ctx.repository.subject_active_by_id(entry.subject_id).await? else {
            continue;
        };
        let quota_minutes = entry.quota_minutes();
        let assigned_minutes = subject_minutes(&course_blocks, subject.id, Some(block.id));
        let remaining_minutes = quota_minutes - assigned_minutes;
        let is_current = block.subject_id == Some(subject.id);
        subjects.push(SubjectOption {
            subject_id: subject.id,
            subject_name: subject.name,
            quota_minutes,
            assigned_minutes,
            remaining_minutes,
            assignable: remaining_minutes >= block_minutes || is_current,
            is_current,
        });
    }
    subjects.sort_by(|a, b| {
        a.subject_name
            .cmp(&b.subject_name)
            .then(a.subject_id.cmp(&b.subject_id))
    });

    Ok(SubjectAvailability {
        block_id: block.id,
        block_minutes,
        current_subject_id: block.subject_id,
        subjects,
    })
}

/// Active teachers of the block's subject, with their yearly load and
/// whether this block would double-book them.
pub async fn available_teachers(
    ctx: &EngineContext,
    course_id: CourseId,
    block_id: BlockId,
) -> ServiceResult<TeacherAvailability> {
    let course = ctx.load_course(course_id).await?;
    let block = ctx.load_course_block(&course, block_id).await?;
    ensure_class_block(&block)?;
    let subject_id = block.subject_id.ok_or_else(|| {
        ServiceError::rule(
            RuleCode::BloqueSinMateriaParaProfesor,
            format!("block {} needs a subject before a teacher", block.id),
        )
    })?;

    let teachers = ctx
        .repository
        .active_teachers_teaching_subject(subject_id)
        .await?;
    let year_blocks = ctx
        .repository
        .active_class_blocks_for_year(course.school_year_id, None)
        .await?;

    let mut minutes_by_teacher: HashMap<TeacherId, i64> = HashMap::new();
    for b in &year_blocks {
        if let Some(teacher_id) = b.teacher_id {
            *minutes_by_teacher.entry(teacher_id).or_default() += b.duration_minutes();
        }
    }

    let mut course_names: HashMap<CourseId, String> = HashMap::new();
    let mut options = Vec::with_capacity(teachers.len());
    for teacher in teachers {
        let assigned_minutes = minutes_by_teacher.get(&teacher.id).copied().unwrap_or(0);
        let conflict = match first_collision(&year_blocks, &block, teacher.id) {
            Some(other) => {
                if !course_names.contains_key(&other.course_id) {
                    let name = ctx
                        .repository
                        .get_course(other.course_id)
                        .await?
                        .map(|c| c.name)
                        .unwrap_or_default();
                    course_names.insert(other.course_id, name);
                }
                Some(TeacherConflict {
                    block_id: other.id,
                    course_id: other.course_id,
                    course_name: course_names
                        .get(&other.course_id)
                        .cloned()
                        .unwrap_or_default(),
                    weekday: other.weekday,
                    start: other.start,
                    end: other.end,
                })
            }
            None => None,
        };

        options.push(TeacherOption {
            teacher_id: teacher.id,
            teacher_name: teacher.name,
            contract_hours: teacher.contract_hours,
            assigned_minutes,
            assigned_hours: pedagogical_hours_ceil(assigned_minutes),
            available: conflict.is_none(),
            conflict,
            is_current: block.teacher_id == Some(teacher.id),
        });
    }
    options.sort_by(|a, b| {
        a.teacher_name
            .cmp(&b.teacher_name)
            .then(a.teacher_id.cmp(&b.teacher_id))
    });

    Ok(TeacherAvailability {
        block_id: block.id,
        subject_id,
        current_teacher_id: block.teacher_id,
        teachers: options,
    })
}

#[cfg(test)]
#[path = "availability_tests.rs"]
mod availability_tests;
