use super::*;
use crate::models::{BlockType, CourseId};
use crate::services::error::ErrorKind;
use crate::services::fixtures::*;

fn window() -> SchoolDayWindow {
    SchoolDayWindow::default()
}

#[test]
fn test_validate_accepts_standard_day() {
    assert!(validate_day_layout(1, &standard_day(), &window()).is_ok());
}

#[test]
fn test_validate_weekday_range() {
    for weekday in [0, 7] {
        let err = validate_day_layout(weekday, &standard_day(), &window()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    }
    assert!(validate_day_layout(6, &standard_day(), &window()).is_ok());
}

#[test]
fn test_validate_empty_day() {
    let err = validate_day_layout(1, &[], &window()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
}

#[test]
fn test_validate_numbering() {
    let gap = vec![
        spec(1, (8, 0), (8, 45), BlockType::Clase),
        spec(3, (8, 45), (9, 30), BlockType::Clase),
    ];
    let err = validate_day_layout(1, &gap, &window()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    assert!(err.to_string().contains("1..2"));

    let duplicate = vec![
        spec(1, (8, 0), (8, 45), BlockType::Clase),
        spec(1, (8, 45), (9, 30), BlockType::Clase),
    ];
    assert!(validate_day_layout(1, &duplicate, &window()).is_err());
}

#[test]
fn test_validate_inverted_block() {
    let blocks = vec![spec(1, (9, 0), (8, 0), BlockType::Clase)];
    let err = validate_day_layout(1, &blocks, &window()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);

    let zero = vec![spec(1, (9, 0), (9, 0), BlockType::Clase)];
    assert!(validate_day_layout(1, &zero, &window()).is_err());
}

#[test]
fn test_validate_school_day_window() {
    let early = vec![spec(1, (6, 30), (7, 15), BlockType::Clase)];
    let err = validate_day_layout(1, &early, &window()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    assert!(err.to_string().contains("outside the school day"));

    let edges = vec![
        spec(1, (7, 0), (7, 45), BlockType::Clase),
        spec(2, (7, 45), (20, 0), BlockType::Clase),
    ];
    assert!(validate_day_layout(1, &edges, &window()).is_ok());
}

#[test]
fn test_validate_contiguity() {
    let blocks = vec![
        spec(1, (8, 0), (8, 45), BlockType::Clase),
        spec(2, (8, 50), (9, 30), BlockType::Clase),
    ];
    let err = validate_day_layout(1, &blocks, &window()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    assert!(err.to_string().contains("ends at 08:45"));
}

#[test]
fn test_validate_two_lunches() {
    let blocks = vec![
        spec(1, (8, 0), (8, 45), BlockType::Clase),
        spec(2, (8, 45), (9, 30), BlockType::Almuerzo),
        spec(3, (9, 30), (10, 15), BlockType::Almuerzo),
        spec(4, (10, 15), (11, 0), BlockType::Clase),
    ];
    let err = validate_day_layout(1, &blocks, &window()).unwrap_err();
    assert_eq!(err.rule_code(), Some(RuleCode::JornadaMultiplesAlmuerzos));
    assert!(err.to_string().contains("only one ALMUERZO block per day"));
}

#[test]
fn test_validate_needs_a_class() {
    let blocks = vec![spec(1, (10, 0), (10, 15), BlockType::Recreo)];
    let err = validate_day_layout(1, &blocks, &window()).unwrap_err();
    assert_eq!(err.rule_code(), Some(RuleCode::JornadaSinClases));
}

#[test]
fn test_validate_class_at_both_ends() {
    let ends_in_break = vec![
        spec(1, (8, 0), (8, 45), BlockType::Clase),
        spec(2, (8, 45), (9, 0), BlockType::Recreo),
    ];
    let err = validate_day_layout(1, &ends_in_break, &window()).unwrap_err();
    assert_eq!(err.rule_code(), Some(RuleCode::JornadaExtremoNoEsClase));

    let starts_with_lunch = vec![
        spec(1, (12, 0), (12, 45), BlockType::Almuerzo),
        spec(2, (12, 45), (13, 30), BlockType::Clase),
    ];
    let err = validate_day_layout(1, &starts_with_lunch, &window()).unwrap_err();
    assert_eq!(err.rule_code(), Some(RuleCode::JornadaExtremoNoEsClase));
}

#[test]
fn test_validate_first_failure_wins() {
    // Broken numbering and two lunches: numbering is reported.
    let blocks = vec![
        spec(2, (8, 0), (8, 45), BlockType::Almuerzo),
        spec(3, (8, 45), (9, 30), BlockType::Almuerzo),
    ];
    let err = validate_day_layout(1, &blocks, &window()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
}

#[tokio::test]
async fn test_save_monday_scenario() {
    let fx = Fixture::new();
    let blocks = vec![
        spec(1, (8, 0), (8, 45), BlockType::Clase),
        spec(2, (8, 45), (9, 30), BlockType::Recreo),
        spec(3, (9, 30), (10, 15), BlockType::Clase),
    ];

    let summary = save_day(&fx.ctx, COURSE_A, 1, blocks).await.unwrap();
    assert_eq!(summary.weekday, 1);
    assert_eq!(summary.blocks.len(), 3);
    assert_eq!(summary.class_block_count, 2);
    assert_eq!(summary.day_start, Some(t(8, 0)));
    assert_eq!(summary.day_end, Some(t(10, 15)));
    assert!(summary
        .blocks
        .iter()
        .all(|b| b.active && b.subject_id.is_none() && b.teacher_id.is_none()));
}

#[tokio::test]
async fn test_resave_replaces_previous_generation() {
    let fx = Fixture::new();
    let first = fx.save_standard_day(COURSE_A, 2).await;

    let shorter = vec![spec(1, (8, 0), (8, 45), BlockType::Clase)];
    let second = save_day(&fx.ctx, COURSE_A, 2, shorter).await.unwrap();
    assert_eq!(second.blocks.len(), 1);

    let day = get_day(&fx.ctx, COURSE_A, 2).await.unwrap();
    assert_eq!(day.blocks, second.blocks);
    assert_eq!(fx.repo.total_block_rows(), first.len() + 1);
    assert_eq!(fx.repo.generation_of(COURSE_A, 2), 2);
}

#[tokio::test]
async fn test_invalid_layout_writes_nothing() {
    let fx = Fixture::new();
    fx.save_standard_day(COURSE_A, 1).await;

    let bad = vec![spec(1, (8, 0), (8, 45), BlockType::Recreo)];
    assert!(save_day(&fx.ctx, COURSE_A, 1, bad).await.is_err());

    let day = get_day(&fx.ctx, COURSE_A, 1).await.unwrap();
    assert_eq!(day.blocks.len(), 4);
    assert_eq!(fx.repo.generation_of(COURSE_A, 1), 1);
}

#[tokio::test]
async fn test_save_unknown_course() {
    let fx = Fixture::new();
    let err = save_day(&fx.ctx, CourseId::new(404), 1, standard_day())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_save_closed_year_is_rejected_before_validation() {
    let fx = Fixture::new();
    fx.close_year();
    // Even a malformed weekday reports the closed year first.
    let err = save_day(&fx.ctx, COURSE_A, 9, standard_day()).await.unwrap_err();
    assert_eq!(err.rule_code(), Some(RuleCode::AnioEscolarCerrado));
}

#[tokio::test]
async fn test_planning_phase_is_editable() {
    let fx = Fixture::new();
    fx.clock.set(d(2025, 2, 1).and_hms_opt(9, 0, 0).unwrap());
    assert!(save_day(&fx.ctx, COURSE_A, 1, standard_day()).await.is_ok());
}

#[tokio::test]
async fn test_school_day_window_comes_from_context() {
    let mut fx = Fixture::new();
    fx.ctx = fx
        .ctx
        .clone()
        .with_school_day(SchoolDayWindow::new(t(9, 0), t(13, 0)).unwrap());
    let err = save_day(&fx.ctx, COURSE_A, 1, standard_day()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
}

#[tokio::test]
async fn test_course_schedule_lists_all_weekdays() {
    let fx = Fixture::new();
    fx.save_standard_day(COURSE_A, 1).await;
    fx.save_standard_day(COURSE_A, 6).await;

    let schedule = get_course_schedule(&fx.ctx, COURSE_A).await.unwrap();
    assert_eq!(schedule.days.len(), 6);
    let configured: Vec<u8> = schedule
        .days
        .iter()
        .filter(|d| !d.is_empty())
        .map(|d| d.weekday)
        .collect();
    assert_eq!(configured, vec![1, 6]);
}

#[tokio::test]
async fn test_get_day_rejects_bad_weekday() {
    let fx = Fixture::new();
    let err = get_day(&fx.ctx, COURSE_A, 0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailed);
}
