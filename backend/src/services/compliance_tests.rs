use super::*;
use crate::models::{
    AttendanceRecord, AttendanceStatus, BlockType, DayOffKind, StudentAttendance, StudentId,
};
use crate::services::error::ErrorKind;
use crate::services::fixtures::*;
use crate::services::schedule_builder::save_day;
use crate::services::subject_assignment::assign_subject;
use crate::services::teacher_assignment::assign_teacher;

fn at(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
    date.and_hms_opt(h, m, 0).unwrap()
}

/// Ana on Monday 2025-03-03: 1A 08:00 (Lenguaje, attendance taken),
/// 1A 08:45 (Matemática), 1B 09:45 and 1B 10:30 (Matemática).
async fn ana_monday(fx: &Fixture) -> Vec<TimeBlock> {
    let a = fx.save_standard_day(COURSE_A, 1).await;
    assign_subject(&fx.ctx, COURSE_A, a[0].id, LANGUAGE).await.unwrap();
    assign_subject(&fx.ctx, COURSE_A, a[1].id, MATH).await.unwrap();
    assign_teacher(&fx.ctx, COURSE_A, a[0].id, ANA).await.unwrap();
    assign_teacher(&fx.ctx, COURSE_A, a[1].id, ANA).await.unwrap();

    let b = save_day(
        &fx.ctx,
        COURSE_B,
        1,
        vec![
            spec(1, (9, 45), (10, 30), BlockType::Clase),
            spec(2, (10, 30), (11, 15), BlockType::Clase),
        ],
    )
    .await
    .unwrap()
    .blocks;
    for block in &b {
        assign_subject(&fx.ctx, COURSE_B, block.id, MATH).await.unwrap();
        assign_teacher(&fx.ctx, COURSE_B, block.id, ANA).await.unwrap();
    }

    let entries = [
        AttendanceStatus::Presente,
        AttendanceStatus::Presente,
        AttendanceStatus::Presente,
        AttendanceStatus::Ausente,
        AttendanceStatus::Atrasado,
    ]
    .into_iter()
    .enumerate()
    .map(|(i, status)| StudentAttendance {
        student_id: StudentId::new(i as i64 + 1),
        status,
    })
    .collect();
    fx.repo.insert_attendance(AttendanceRecord {
        block_id: a[0].id,
        date: d(2025, 3, 3),
        entries,
    });

    vec![a[0].clone(), a[1].clone(), b[0].clone(), b[1].clone()]
}

#[test]
fn test_classify_pending_edges() {
    let day = d(2025, 3, 3);
    let (start, end) = (at(day, 8, 0), at(day, 8, 45));
    assert_eq!(classify_pending(at(day, 7, 59), start, end), ComplianceState::Programada);
    assert_eq!(classify_pending(start, start, end), ComplianceState::EnCurso);
    assert_eq!(classify_pending(at(day, 8, 44), start, end), ComplianceState::EnCurso);
    assert_eq!(classify_pending(end, start, end), ComplianceState::NoTomada);
    // A past date is entirely due.
    assert_eq!(
        classify_pending(at(d(2025, 3, 4), 7, 0), start, end),
        ComplianceState::NoTomada
    );
}

#[test]
fn test_classify_today_edges() {
    let day = d(2025, 3, 3);
    let (start, end) = (at(day, 8, 0), at(day, 8, 45));
    assert_eq!(classify_today(at(day, 7, 59), start, end), TodayState::Pendiente);
    assert_eq!(classify_today(start, start, end), TodayState::Disponible);
    assert_eq!(classify_today(end, start, end), TodayState::Expirada);
}

#[tokio::test]
async fn test_report_classifies_every_state() {
    let fx = Fixture::new();
    let blocks = ana_monday(&fx).await;

    // Clock: Monday 10:00.
    let report = compliance_report(&fx.ctx, ANA, d(2025, 3, 3), YEAR)
        .await
        .unwrap();
    assert!(report.is_business_day);
    assert!(report.day_off.is_none());

    let states: Vec<_> = report.blocks.iter().map(|b| (b.block_id, b.state)).collect();
    assert_eq!(
        states,
        vec![
            (blocks[0].id, ComplianceState::Tomada),
            (blocks[1].id, ComplianceState::NoTomada),
            (blocks[2].id, ComplianceState::EnCurso),
            (blocks[3].id, ComplianceState::Programada),
        ]
    );

    let taken = &report.blocks[0];
    let breakdown = taken.attendance.as_ref().unwrap();
    assert_eq!(breakdown.presente, 3);
    assert_eq!(breakdown.ausente, 1);
    assert_eq!(breakdown.atrasado, 1);
    assert_eq!(breakdown.total, 5);
    assert_eq!(taken.subject_name.as_deref(), Some("Lenguaje"));
    assert_eq!(taken.course_name, "1° Básico A");
    assert_eq!(taken.enrolled_students, 30);
    assert_eq!(report.blocks[2].enrolled_students, 28);
    assert!(report.blocks[1].attendance.is_none());

    assert_eq!(report.summary.total_blocks, 4);
    assert_eq!(report.summary.tomada, 1);
    assert_eq!(report.summary.no_tomada, 1);
    assert_eq!(report.summary.en_curso, 1);
    assert_eq!(report.summary.programada, 1);
    assert_eq!(report.summary.compliance_percentage, Some(50.0));
}

#[tokio::test]
async fn test_saturday_scenario() {
    let fx = Fixture::new();
    ana_monday(&fx).await;
    let report = compliance_report(&fx.ctx, ANA, d(2025, 3, 8), YEAR)
        .await
        .unwrap();
    assert!(!report.is_business_day);
    assert!(report.blocks.is_empty());
    assert_eq!(report.summary.total_blocks, 0);
    assert_eq!(report.summary.compliance_percentage, None);
}

#[tokio::test]
async fn test_non_instructional_day() {
    let fx = Fixture::new();
    ana_monday(&fx).await;
    // The following Monday is a holiday.
    fx.repo.insert_non_instructional_day(NonInstructionalDay {
        school_year_id: YEAR,
        date: d(2025, 3, 10),
        kind: DayOffKind::Feriado,
        description: "Feriado regional".to_string(),
    });

    let report = compliance_report(&fx.ctx, ANA, d(2025, 3, 10), YEAR)
        .await
        .unwrap();
    assert!(report.is_business_day);
    assert!(report.blocks.is_empty());
    let day_off = report.day_off.unwrap();
    assert_eq!(day_off.kind, DayOffKind::Feriado);
    assert_eq!(day_off.description, "Feriado regional");
}

#[tokio::test]
async fn test_future_date_is_programmed() {
    let fx = Fixture::new();
    ana_monday(&fx).await;
    let report = compliance_report(&fx.ctx, ANA, d(2025, 3, 10), YEAR)
        .await
        .unwrap();
    assert!(report
        .blocks
        .iter()
        .all(|b| b.state == ComplianceState::Programada));
}

#[tokio::test]
async fn test_report_unknown_teacher_or_year() {
    let fx = Fixture::new();
    let err = compliance_report(&fx.ctx, TeacherId::new(5), d(2025, 3, 3), YEAR)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = compliance_report(&fx.ctx, ANA, d(2025, 3, 3), SchoolYearId::new(1999))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_classes_today() {
    let fx = Fixture::new();
    let blocks = ana_monday(&fx).await;

    let today = classes_today(&fx.ctx, ANA, YEAR).await.unwrap();
    assert_eq!(today.date, d(2025, 3, 3));
    assert!(today.is_business_day);

    let view: Vec<_> = today
        .classes
        .iter()
        .map(|c| (c.block_id, c.state, c.attendance_taken))
        .collect();
    assert_eq!(
        view,
        vec![
            (blocks[0].id, TodayState::Expirada, true),
            (blocks[1].id, TodayState::Expirada, false),
            (blocks[2].id, TodayState::Disponible, false),
            (blocks[3].id, TodayState::Pendiente, false),
        ]
    );
}

#[tokio::test]
async fn test_classes_today_on_sunday() {
    let fx = Fixture::new();
    ana_monday(&fx).await;
    fx.clock.set(at(d(2025, 3, 9), 9, 0));
    let today = classes_today(&fx.ctx, ANA, YEAR).await.unwrap();
    assert!(!today.is_business_day);
    assert!(today.classes.is_empty());
}
