mod common;

use common::{make_course, make_user, setup};
use database::errors::GradeError;
use database::services::enrollment::EnrollmentService;
use database::services::grade::{GradeService, NewAssessment};
use models::{
    grading::LetterGrade, options::AssessmentOptions, role::Role, status::AssessmentCategory,
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

async fn make_assessment(
    db: &DatabaseConnection,
    course_id: Uuid,
    title: &str,
    category: AssessmentCategory,
    total_points: f64,
) -> database::entities::assessments::Model {
    GradeService::create_assessment(
        db,
        NewAssessment {
            course_id,
            title: title.to_string(),
            category,
            total_points,
            due_at: None,
            options: AssessmentOptions::default(),
        },
    )
    .await
    .expect("create assessment")
}

#[tokio::test]
async fn score_upsert_keeps_one_row_per_student() {
    let db = setup().await;
    let course = make_course(&db, "CS101", 3, 30).await;
    let student = make_user(&db, "alice", Role::Student).await;
    let hw = make_assessment(&db, course.id, "HW 1", AssessmentCategory::Assignment, 100.0).await;

    let first = GradeService::record_score(&db, hw.id, student.id, 70.0)
        .await
        .expect("first score");
    let second = GradeService::record_score(&db, hw.id, student.id, 85.0)
        .await
        .expect("regrade");

    assert_eq!(first.id, second.id);
    assert_eq!(second.points_earned, Some(85.0));
}

#[tokio::test]
async fn assessment_total_points_must_be_positive() {
    let db = setup().await;
    let course = make_course(&db, "CS101", 3, 30).await;

    for bad_total in [0.0, -10.0] {
        let err = GradeService::create_assessment(
            &db,
            NewAssessment {
                course_id: course.id,
                title: "HW 1".to_string(),
                category: AssessmentCategory::Assignment,
                total_points: bad_total,
                due_at: None,
                options: AssessmentOptions::default(),
            },
        )
        .await
        .expect_err("non-positive total");
        match err {
            GradeError::InvalidTotalPoints { total } => assert_eq!(total, bad_total),
            other => panic!("expected InvalidTotalPoints, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn score_outside_total_points_is_rejected() {
    let db = setup().await;
    let course = make_course(&db, "CS101", 3, 30).await;
    let student = make_user(&db, "alice", Role::Student).await;
    let hw = make_assessment(&db, course.id, "HW 1", AssessmentCategory::Assignment, 50.0).await;

    assert!(matches!(
        GradeService::record_score(&db, hw.id, student.id, 50.5).await,
        Err(GradeError::ScoreOutOfRange { .. })
    ));
    assert!(matches!(
        GradeService::record_score(&db, hw.id, student.id, -1.0).await,
        Err(GradeError::ScoreOutOfRange { .. })
    ));
    GradeService::record_score(&db, hw.id, student.id, 50.0)
        .await
        .expect("full marks are in range");
}

#[tokio::test]
async fn course_grade_renormalizes_over_graded_categories() {
    let db = setup().await;
    // Weights are 40 / 20 / 40 (assignments / quizzes / exams).
    let course = make_course(&db, "CS101", 3, 30).await;
    let student = make_user(&db, "alice", Role::Student).await;

    let hw = make_assessment(&db, course.id, "HW 1", AssessmentCategory::Assignment, 100.0).await;
    let exam = make_assessment(&db, course.id, "Final", AssessmentCategory::Exam, 100.0).await;
    // A quiz exists but has no score yet.
    make_assessment(&db, course.id, "Quiz 1", AssessmentCategory::Quiz, 10.0).await;

    GradeService::record_score(&db, hw.id, student.id, 90.0)
        .await
        .expect("hw score");
    GradeService::record_score(&db, exam.id, student.id, 70.0)
        .await
        .expect("exam score");

    let grade = GradeService::course_grade(&db, student.id, course.id)
        .await
        .expect("course grade");

    // Quizzes carry no graded work, so 90% and 70% are averaged over
    // the remaining 40+40 weight: exactly 80%.
    let percent = grade.percent.expect("has a percent");
    assert!((percent - 80.0).abs() < 1e-9, "got {percent}");
    assert_eq!(grade.letter, Some(LetterGrade::B));
    assert_eq!(grade.categories.len(), 2);
}

#[tokio::test]
async fn course_grade_with_no_graded_work_is_none() {
    let db = setup().await;
    let course = make_course(&db, "CS101", 3, 30).await;
    let student = make_user(&db, "alice", Role::Student).await;
    make_assessment(&db, course.id, "HW 1", AssessmentCategory::Assignment, 100.0).await;

    let grade = GradeService::course_grade(&db, student.id, course.id)
        .await
        .expect("course grade");
    assert_eq!(grade.percent, None);
    assert_eq!(grade.letter, None);
    assert!(grade.categories.is_empty());
}

#[tokio::test]
async fn transcript_averages_completed_grades() {
    let db = setup().await;
    let student = make_user(&db, "alice", Role::Student).await;

    let cs = make_course(&db, "CS101", 3, 30).await;
    let math = make_course(&db, "MATH201", 4, 30).await;
    let open = make_course(&db, "BIO110", 3, 30).await;

    let e1 = EnrollmentService::enroll(&db, student.id, cs.id)
        .await
        .expect("enroll cs");
    let e2 = EnrollmentService::enroll(&db, student.id, math.id)
        .await
        .expect("enroll math");
    // Still in progress, so it stays off the transcript.
    EnrollmentService::enroll(&db, student.id, open.id)
        .await
        .expect("enroll bio");

    EnrollmentService::complete(&db, e1.id, LetterGrade::A)
        .await
        .expect("complete cs");
    EnrollmentService::complete(&db, e2.id, LetterGrade::B)
        .await
        .expect("complete math");

    let transcript = GradeService::transcript(&db, student.id)
        .await
        .expect("transcript");
    assert_eq!(transcript.rows.len(), 2);
    let gpa = transcript.gpa.expect("has a gpa");
    assert!((gpa - 3.5).abs() < 1e-9, "got {gpa}");
}

#[tokio::test]
async fn transcript_of_a_fresh_student_is_empty() {
    let db = setup().await;
    let student = make_user(&db, "alice", Role::Student).await;

    let transcript = GradeService::transcript(&db, student.id)
        .await
        .expect("transcript");
    assert!(transcript.rows.is_empty());
    assert_eq!(transcript.gpa, None);
}
