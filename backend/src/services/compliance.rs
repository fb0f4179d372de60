//! Attendance compliance of a teacher's classes on a date.
//!
//! Weekends and recorded non-instructional days short-circuit before any
//! block, attendance or enrollment lookup. Otherwise every active class block
//! the teacher holds on that weekday is classified against "now", read once
//! from the clock.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use log::debug;

use super::context::EngineContext;
use super::error::{ServiceError, ServiceResult};
use crate::models::{
    is_business_day, weekday_number, CourseId, NonInstructionalDay, SchoolYearId,
    SubjectId, Teacher, TeacherId, TimeBlock,
};
use crate::routes::compliance::{
    AttendanceBreakdown, ComplianceBlock, ComplianceReport, ComplianceState, ComplianceTotals,
    DayOff, TodayClass, TodayClasses, TodayState,
};

/// Classify one class occurrence that has no attendance record.
pub fn classify_pending(
    now: NaiveDateTime,
    start_at: NaiveDateTime,
    end_at: NaiveDateTime,
) -> ComplianceState {
    if end_at <= now {
        ComplianceState::NoTomada
    } else if start_at <= now {
        ComplianceState::EnCurso
    } else {
        ComplianceState::Programada
    }
}

/// Dashboard view of one of today's classes.
pub fn classify_today(
    now: NaiveDateTime,
    start_at: NaiveDateTime,
    end_at: NaiveDateTime,
) -> TodayState {
    if now < start_at {
        TodayState::Pendiente
    } else if now < end_at {
        TodayState::Disponible
    } else {
        TodayState::Expirada
    }
}

/// What the calendar says about `date` before any block is looked at.
enum DayKind {
    Weekend,
    DayOff(NonInstructionalDay),
    Teaching,
}

struct TeacherDay {
    teacher: Teacher,
    kind: DayKind,
}

async fn resolve_day(
    ctx: &EngineContext,
    teacher_id: TeacherId,
    school_year_id: SchoolYearId,
    date: NaiveDate,
) -> ServiceResult<TeacherDay> {
    let teacher = ctx
        .repository
        .get_teacher(teacher_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("teacher", teacher_id))?;
    ctx.repository
        .get_school_year(school_year_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("school_year", school_year_id))?;

    if !is_business_day(date) {
        debug!("{} is not a business day", date);
        return Ok(TeacherDay {
            teacher,
            kind: DayKind::Weekend,
        });
    }
    if let Some(day) = ctx
        .repository
        .non_instructional_day(school_year_id, date)
        .await?
    {
        debug!("{} is a non-instructional day ({:?})", date, day.kind);
        return Ok(TeacherDay {
            teacher,
            kind: DayKind::DayOff(day),
        });
    }
    Ok(TeacherDay {
        teacher,
        kind: DayKind::Teaching,
    })
}

/// The teacher's active class blocks on the weekday of `date`, with course
/// and subject display names.
struct ScheduledClasses {
    blocks: Vec<TimeBlock>,
    course_names: HashMap<CourseId, String>,
    subject_names: HashMap<SubjectId, String>,
}

async fn scheduled_classes(
    ctx: &EngineContext,
    teacher: &Teacher,
    school_year_id: SchoolYearId,
    date: NaiveDate,
) -> ServiceResult<ScheduledClasses> {
    let mut blocks: Vec<TimeBlock> = ctx
        .repository
        .active_class_blocks_for_year(school_year_id, Some(weekday_number(date)))
        .await?
        .into_iter()
        .filter(|b| b.teacher_id == Some(teacher.id))
        .collect();
    blocks.sort_by_key(|b| (b.start, b.course_id));

    let mut course_ids: Vec<CourseId> = blocks.iter().map(|b| b.course_id).collect();
    course_ids.sort();
    course_ids.dedup();
    let course_names = ctx
        .repository
        .get_courses(&course_ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let mut subject_names = HashMap::new();
    for subject_id in blocks.iter().filter_map(|b| b.subject_id) {
        if subject_names.contains_key(&subject_id) {
            continue;
        }
        if let Some(subject) = ctx.repository.get_subject(subject_id).await? {
            subject_names.insert(subject_id, subject.name);
        }
    }

    Ok(ScheduledClasses {
        blocks,
        course_names,
        subject_names,
    })
}

/// Attendance compliance of a teacher's classes on `date`.
pub async fn compliance_report(
    ctx: &EngineContext,
    teacher_id: TeacherId,
    date: NaiveDate,
    school_year_id: SchoolYearId,
) -> ServiceResult<ComplianceReport> {
    let now = ctx.clock.now();
    let day = resolve_day(ctx, teacher_id, school_year_id, date).await?;

    let mut report = ComplianceReport {
        teacher_id: day.teacher.id,
        school_year_id,
        date,
        is_business_day: true,
        day_off: None,
        blocks: Vec::new(),
        summary: ComplianceTotals::default(),
    };
    match day.kind {
        DayKind::Weekend => {
            report.is_business_day = false;
            return Ok(report);
        }
        DayKind::DayOff(off) => {
            report.day_off = Some(DayOff::from(off));
            return Ok(report);
        }
        DayKind::Teaching => {}
    }

    let classes = scheduled_classes(ctx, &day.teacher, school_year_id, date).await?;
    let block_ids: Vec<_> = classes.blocks.iter().map(|b| b.id).collect();
    let records: HashMap<_, _> = ctx
        .repository
        .attendance_records(&block_ids, date)
        .await?
        .into_iter()
        .map(|r| (r.block_id, r))
        .collect();
    let course_ids: Vec<CourseId> = classes.course_names.keys().copied().collect();
    let enrollments = ctx.repository.active_enrollment_counts(&course_ids).await?;

    for block in classes.blocks {
        let (state, attendance) = match records.get(&block.id) {
            Some(record) => (
                ComplianceState::Tomada,
                Some(AttendanceBreakdown::from(record)),
            ),
            None => (
                classify_pending(now, date.and_time(block.start), date.and_time(block.end)),
                None,
            ),
        };
        report.blocks.push(ComplianceBlock {
            block_id: block.id,
            course_id: block.course_id,
            course_name: classes
                .course_names
                .get(&block.course_id)
                .cloned()
                .unwrap_or_default(),
            block_number: block.block_number,
            start: block.start,
            end: block.end,
            subject_id: block.subject_id,
            subject_name: block
                .subject_id
                .and_then(|id| classes.subject_names.get(&id).cloned()),
            state,
            attendance,
            enrolled_students: enrollments.get(&block.course_id).copied().unwrap_or(0),
        });
    }
    report.summary = ComplianceTotals::from_states(report.blocks.iter().map(|b| b.state));

    debug!(
        "Compliance for teacher {} on {}: {} blocks, {:?}%",
        teacher_id, date, report.summary.total_blocks, report.summary.compliance_percentage
    );
    Ok(report)
}

/// The teacher's classes for the clock's current day.
pub async fn classes_today(
    ctx: &EngineContext,
    teacher_id: TeacherId,
    school_year_id: SchoolYearId,
) -> ServiceResult<TodayClasses> {
    let now = ctx.clock.now();
    let date = now.date();
    let day = resolve_day(ctx, teacher_id, school_year_id, date).await?;

    let mut today = TodayClasses {
        teacher_id: day.teacher.id,
        school_year_id,
        date,
        is_business_day: true,
        day_off: None,
        classes: Vec::new(),
    };
    match day.kind {
        DayKind::Weekend => {
            today.is_business_day = false;
            return Ok(today);
        }
        DayKind::DayOff(off) => {
            today.day_off = Some(DayOff::from(off));
            return Ok(today);
        }
        DayKind::Teaching => {}
    }

    let classes = scheduled_classes(ctx, &day.teacher, school_year_id, date).await?;
    for block in classes.blocks {
        let attendance_taken = ctx.repository.attendance_exists(block.id, date).await?;
        today.classes.push(TodayClass {
            block_id: block.id,
            course_id: block.course_id,
            course_name: classes
                .course_names
                .get(&block.course_id)
                .cloned()
                .unwrap_or_default(),
            block_number: block.block_number,
            start: block.start,
            end: block.end,
            subject_id: block.subject_id,
            subject_name: block
                .subject_id
                .and_then(|id| classes.subject_names.get(&id).cloned()),
            state: classify_today(now, date.and_time(block.start), date.and_time(block.end)),
            attendance_taken,
        });
    }
    Ok(today)
}

#[cfg(test)]
#[path = "compliance_tests.rs"]
mod compliance_tests;
