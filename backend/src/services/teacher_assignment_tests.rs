use super::*;
use crate::db::repository::ScheduleRepository;
use crate::models::BlockType;
use crate::services::error::ErrorKind;
use crate::services::fixtures::*;
use crate::services::schedule_builder::save_day;
use crate::services::subject_assignment::assign_subject;

async fn math_block(fx: &Fixture, course_id: CourseId, weekday: u8) -> Vec<TimeBlock> {
    let blocks = fx.save_standard_day(course_id, weekday).await;
    assign_subject(&fx.ctx, course_id, blocks[0].id, MATH)
        .await
        .unwrap();
    blocks
}

#[tokio::test]
async fn test_assign_teacher() {
    let fx = Fixture::new();
    let blocks = math_block(&fx, COURSE_A, 1).await;

    let result = assign_teacher(&fx.ctx, COURSE_A, blocks[0].id, BRUNO)
        .await
        .unwrap();
    assert!(result.changed);
    assert_eq!(result.block.teacher_id, Some(BRUNO));
    assert_eq!(result.block.subject_id, Some(MATH));

    let again = assign_teacher(&fx.ctx, COURSE_A, blocks[0].id, BRUNO)
        .await
        .unwrap();
    assert!(!again.changed);
}

#[tokio::test]
async fn test_collision_across_courses_scenario() {
    let fx = Fixture::new();
    let a = math_block(&fx, COURSE_A, 1).await;
    assign_teacher(&fx.ctx, COURSE_A, a[0].id, ANA).await.unwrap();

    // 1B Monday: a Math class 08:30-09:15 overlapping 1A's 08:00-08:45.
    let b = save_day(
        &fx.ctx,
        COURSE_B,
        1,
        vec![
            spec(1, (7, 45), (8, 30), BlockType::Clase),
            spec(2, (8, 30), (9, 15), BlockType::Clase),
        ],
    )
    .await
    .unwrap()
    .blocks;
    assign_subject(&fx.ctx, COURSE_B, b[1].id, MATH)
        .await
        .unwrap();

    let err = assign_teacher(&fx.ctx, COURSE_B, b[1].id, ANA)
        .await
        .unwrap_err();
    assert_eq!(err.rule_code(), Some(RuleCode::ProfesorColisionHorario));

    let untouched = fx.repo.get_block(b[1].id).await.unwrap().unwrap();
    assert_eq!(untouched.teacher_id, None);
}

#[tokio::test]
async fn test_back_to_back_and_other_weekday_do_not_collide() {
    let fx = Fixture::new();
    let monday = fx.save_standard_day(COURSE_A, 1).await;
    assign_subject(&fx.ctx, COURSE_A, monday[0].id, MATH)
        .await
        .unwrap();
    assign_subject(&fx.ctx, COURSE_A, monday[1].id, MATH)
        .await
        .unwrap();
    assign_teacher(&fx.ctx, COURSE_A, monday[0].id, ANA)
        .await
        .unwrap();
    // 08:45-09:30 right after 08:00-08:45.
    assert!(assign_teacher(&fx.ctx, COURSE_A, monday[1].id, ANA)
        .await
        .is_ok());

    let tuesday = math_block(&fx, COURSE_B, 2).await;
    assert!(assign_teacher(&fx.ctx, COURSE_B, tuesday[0].id, ANA)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_deactivated_blocks_do_not_collide() {
    let fx = Fixture::new();
    let a = math_block(&fx, COURSE_A, 1).await;
    assign_teacher(&fx.ctx, COURSE_A, a[0].id, ANA).await.unwrap();
    // Re-saving the day drops the old generation with Ana on it.
    fx.save_standard_day(COURSE_A, 1).await;

    let b = math_block(&fx, COURSE_B, 1).await;
    assert!(assign_teacher(&fx.ctx, COURSE_B, b[0].id, ANA)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_block_needs_subject() {
    let fx = Fixture::new();
    let blocks = fx.save_standard_day(COURSE_A, 1).await;
    let err = assign_teacher(&fx.ctx, COURSE_A, blocks[0].id, ANA)
        .await
        .unwrap_err();
    assert_eq!(err.rule_code(), Some(RuleCode::BloqueSinMateriaParaProfesor));

    let err = assign_teacher(&fx.ctx, COURSE_A, blocks[2].id, ANA)
        .await
        .unwrap_err();
    assert_eq!(err.rule_code(), Some(RuleCode::BloqueNoEsClase));
}

#[tokio::test]
async fn test_teacher_checks() {
    let fx = Fixture::new();
    let blocks = fx.save_standard_day(COURSE_A, 1).await;
    assign_subject(&fx.ctx, COURSE_A, blocks[0].id, HISTORY)
        .await
        .unwrap();

    let err = assign_teacher(&fx.ctx, COURSE_A, blocks[0].id, TeacherId::new(999))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = assign_teacher(&fx.ctx, COURSE_A, blocks[0].id, CARLA)
        .await
        .unwrap_err();
    assert_eq!(err.rule_code(), Some(RuleCode::ProfesorInactivo));

    let err = assign_teacher(&fx.ctx, COURSE_A, blocks[0].id, BRUNO)
        .await
        .unwrap_err();
    assert_eq!(err.rule_code(), Some(RuleCode::ProfesorNoEnsenaMateria));
}

#[tokio::test]
async fn test_remove_teacher_keeps_subject() {
    let fx = Fixture::new();
    let blocks = math_block(&fx, COURSE_A, 1).await;
    assign_teacher(&fx.ctx, COURSE_A, blocks[0].id, BRUNO)
        .await
        .unwrap();

    let result = remove_teacher(&fx.ctx, COURSE_A, blocks[0].id)
        .await
        .unwrap();
    assert!(result.changed);
    assert_eq!(result.block.teacher_id, None);
    assert_eq!(result.block.subject_id, Some(MATH));

    let again = remove_teacher(&fx.ctx, COURSE_A, blocks[0].id)
        .await
        .unwrap();
    assert!(!again.changed);
}

#[tokio::test]
async fn test_closed_year_blocks_teacher_changes() {
    let fx = Fixture::new();
    let blocks = math_block(&fx, COURSE_A, 1).await;
    fx.close_year();
    let err = assign_teacher(&fx.ctx, COURSE_A, blocks[0].id, BRUNO)
        .await
        .unwrap_err();
    assert_eq!(err.rule_code(), Some(RuleCode::AnioEscolarCerrado));
    let err = remove_teacher(&fx.ctx, COURSE_A, blocks[0].id)
        .await
        .unwrap_err();
    assert_eq!(err.rule_code(), Some(RuleCode::AnioEscolarCerrado));
}

#[tokio::test]
async fn test_concurrent_assignments_never_double_book() {
    let fx = Fixture::new();
    let a = math_block(&fx, COURSE_A, 1).await;
    let b = math_block(&fx, COURSE_B, 1).await;

    let first = {
        let ctx = fx.ctx.clone();
        let id = a[0].id;
        tokio::spawn(async move { assign_teacher(&ctx, COURSE_A, id, ANA).await })
    };
    let second = {
        let ctx = fx.ctx.clone();
        let id = b[0].id;
        tokio::spawn(async move { assign_teacher(&ctx, COURSE_B, id, ANA).await })
    };
    let results = [first.await.unwrap(), second.await.unwrap()];

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let failure = results.iter().find_map(|r| r.as_ref().err()).unwrap();
    assert_eq!(failure.rule_code(), Some(RuleCode::ProfesorColisionHorario));
}
