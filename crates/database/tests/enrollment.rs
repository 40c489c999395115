mod common;

use common::{make_course, make_user, setup};
use database::entities::{courses, enrollments};
use database::errors::EnrollError;
use database::services::catalog::CatalogService;
use database::services::enrollment::EnrollmentService;
use models::{grading::LetterGrade, role::Role, status::EnrollmentStatus};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use uuid::Uuid;

async fn seats(db: &DatabaseConnection, course_id: Uuid) -> i32 {
    courses::Entity::find_by_id(course_id)
        .one(db)
        .await
        .expect("query course")
        .expect("course exists")
        .current_seats
}

async fn enrollment_rows(db: &DatabaseConnection) -> u64 {
    enrollments::Entity::find().count(db).await.expect("count")
}

#[tokio::test]
async fn enroll_increments_seats_and_records_row() {
    let db = setup().await;
    let student = make_user(&db, "alice", Role::Student).await;
    let course = make_course(&db, "CS101", 3, 30).await;

    let enrollment = EnrollmentService::enroll(&db, student.id, course.id)
        .await
        .expect("enroll");

    assert_eq!(enrollment.student_id, student.id);
    assert_eq!(enrollment.course_id, course.id);
    assert_eq!(enrollment.status, EnrollmentStatus::Enrolled.as_str());
    assert_eq!(seats(&db, course.id).await, 1);
}

#[tokio::test]
async fn full_course_is_rejected_without_writes() {
    let db = setup().await;
    let course = make_course(&db, "CS101", 3, 1).await;
    let first = make_user(&db, "alice", Role::Student).await;
    let second = make_user(&db, "bob", Role::Student).await;

    EnrollmentService::enroll(&db, first.id, course.id)
        .await
        .expect("first enroll fills the only seat");

    let err = EnrollmentService::enroll(&db, second.id, course.id)
        .await
        .expect_err("course is full");
    assert!(matches!(err, EnrollError::CourseFull));
    assert_eq!(seats(&db, course.id).await, 1);
    assert_eq!(enrollment_rows(&db).await, 1);
}

#[tokio::test]
async fn seat_check_runs_before_prerequisites() {
    let db = setup().await;
    let intro = make_course(&db, "CS101", 3, 5).await;
    let advanced = make_course(&db, "CS301", 3, 1).await;
    CatalogService::set_prerequisites(&db, advanced.id, vec![intro.id])
        .await
        .expect("set prereqs");

    // A student who completed the prerequisite takes the only seat.
    let veteran = make_user(&db, "vera", Role::Student).await;
    let e = EnrollmentService::enroll(&db, veteran.id, intro.id)
        .await
        .expect("enroll intro");
    EnrollmentService::complete(&db, e.id, LetterGrade::A)
        .await
        .expect("complete intro");
    EnrollmentService::enroll(&db, veteran.id, advanced.id)
        .await
        .expect("enroll advanced");

    // The next student is missing the prerequisite too, but the full
    // course wins because checks run in a fixed order.
    let newcomer = make_user(&db, "ned", Role::Student).await;
    let err = EnrollmentService::enroll(&db, newcomer.id, advanced.id)
        .await
        .expect_err("no seats left");
    assert!(matches!(err, EnrollError::CourseFull));
}

#[tokio::test]
async fn missing_prerequisites_are_listed_sorted() {
    let db = setup().await;
    let student = make_user(&db, "alice", Role::Student).await;
    let calc = make_course(&db, "MATH201", 4, 30).await;
    let intro = make_course(&db, "CS101", 3, 30).await;
    let advanced = make_course(&db, "CS301", 3, 30).await;
    CatalogService::set_prerequisites(&db, advanced.id, vec![calc.id, intro.id])
        .await
        .expect("set prereqs");

    // One of the two is completed; only the other shows up.
    let e = EnrollmentService::enroll(&db, student.id, intro.id)
        .await
        .expect("enroll intro");
    EnrollmentService::complete(&db, e.id, LetterGrade::B)
        .await
        .expect("complete intro");

    let err = EnrollmentService::enroll(&db, student.id, advanced.id)
        .await
        .expect_err("missing prereq");
    match err {
        EnrollError::PrerequisitesNotMet { missing } => {
            assert_eq!(missing, vec!["MATH201".to_string()]);
        }
        other => panic!("expected PrerequisitesNotMet, got {other:?}"),
    }
    assert_eq!(seats(&db, advanced.id).await, 0);
}

#[tokio::test]
async fn enrolled_but_not_completed_prereq_does_not_count() {
    let db = setup().await;
    let student = make_user(&db, "alice", Role::Student).await;
    let intro = make_course(&db, "CS101", 3, 30).await;
    let advanced = make_course(&db, "CS301", 3, 30).await;
    CatalogService::set_prerequisites(&db, advanced.id, vec![intro.id])
        .await
        .expect("set prereqs");

    EnrollmentService::enroll(&db, student.id, intro.id)
        .await
        .expect("enroll intro");

    let err = EnrollmentService::enroll(&db, student.id, advanced.id)
        .await
        .expect_err("intro is in progress, not completed");
    assert!(matches!(err, EnrollError::PrerequisitesNotMet { .. }));
}

#[tokio::test]
async fn duplicate_enrollment_is_rejected() {
    let db = setup().await;
    let student = make_user(&db, "alice", Role::Student).await;
    let course = make_course(&db, "CS101", 3, 30).await;

    EnrollmentService::enroll(&db, student.id, course.id)
        .await
        .expect("first enroll");
    let err = EnrollmentService::enroll(&db, student.id, course.id)
        .await
        .expect_err("second enroll");
    assert!(matches!(err, EnrollError::AlreadyEnrolled));
    assert_eq!(seats(&db, course.id).await, 1);
}

#[tokio::test]
async fn dropped_row_does_not_block_reenrollment() {
    let db = setup().await;
    let student = make_user(&db, "alice", Role::Student).await;
    let course = make_course(&db, "CS101", 3, 30).await;

    let e = EnrollmentService::enroll(&db, student.id, course.id)
        .await
        .expect("enroll");
    assert!(EnrollmentService::drop(&db, e.id).await.expect("drop"));
    assert_eq!(seats(&db, course.id).await, 0);

    EnrollmentService::enroll(&db, student.id, course.id)
        .await
        .expect("re-enroll after drop");
    assert_eq!(seats(&db, course.id).await, 1);
}

#[tokio::test]
async fn credit_cap_allows_exactly_eighteen() {
    let db = setup().await;
    let student = make_user(&db, "alice", Role::Student).await;
    for (code, credits) in [("CS101", 5), ("CS102", 5), ("CS103", 5)] {
        let course = make_course(&db, code, credits, 30).await;
        EnrollmentService::enroll(&db, student.id, course.id)
            .await
            .expect("enroll");
    }

    // 15 enrolled; a 3-credit course lands exactly on the cap.
    let fits = make_course(&db, "CS104", 3, 30).await;
    EnrollmentService::enroll(&db, student.id, fits.id)
        .await
        .expect("18 credits total is allowed");
}

#[tokio::test]
async fn credit_cap_rejects_nineteen() {
    let db = setup().await;
    let student = make_user(&db, "alice", Role::Student).await;
    for (code, credits) in [("CS101", 5), ("CS102", 5), ("CS103", 5)] {
        let course = make_course(&db, code, credits, 30).await;
        EnrollmentService::enroll(&db, student.id, course.id)
            .await
            .expect("enroll");
    }

    let over = make_course(&db, "CS105", 4, 30).await;
    let err = EnrollmentService::enroll(&db, student.id, over.id)
        .await
        .expect_err("19 credits exceeds the cap");
    match err {
        EnrollError::CreditLimitExceeded {
            enrolled,
            requested,
        } => {
            assert_eq!(enrolled, 15);
            assert_eq!(requested, 4);
        }
        other => panic!("expected CreditLimitExceeded, got {other:?}"),
    }
    assert_eq!(seats(&db, over.id).await, 0);
}

#[tokio::test]
async fn dropped_credits_free_up_the_cap() {
    let db = setup().await;
    let student = make_user(&db, "alice", Role::Student).await;
    let mut ids = Vec::new();
    for (code, credits) in [("CS101", 6), ("CS102", 6), ("CS103", 6)] {
        let course = make_course(&db, code, credits, 30).await;
        let e = EnrollmentService::enroll(&db, student.id, course.id)
            .await
            .expect("enroll");
        ids.push(e.id);
    }

    let extra = make_course(&db, "CS104", 3, 30).await;
    assert!(matches!(
        EnrollmentService::enroll(&db, student.id, extra.id).await,
        Err(EnrollError::CreditLimitExceeded { .. })
    ));

    assert!(EnrollmentService::drop(&db, ids[0]).await.expect("drop"));
    EnrollmentService::enroll(&db, student.id, extra.id)
        .await
        .expect("cap freed after drop");
}

#[tokio::test]
async fn unknown_ids_surface_not_found() {
    let db = setup().await;
    let student = make_user(&db, "alice", Role::Student).await;
    let course = make_course(&db, "CS101", 3, 30).await;

    assert!(matches!(
        EnrollmentService::enroll(&db, student.id, Uuid::new_v4()).await,
        Err(EnrollError::NotFound("course"))
    ));
    assert!(matches!(
        EnrollmentService::enroll(&db, Uuid::new_v4(), course.id).await,
        Err(EnrollError::NotFound("student"))
    ));
}

#[tokio::test]
async fn drop_of_unknown_id_is_false_and_touches_nothing() {
    let db = setup().await;
    let student = make_user(&db, "alice", Role::Student).await;
    let course = make_course(&db, "CS101", 3, 30).await;
    EnrollmentService::enroll(&db, student.id, course.id)
        .await
        .expect("enroll");

    assert!(!EnrollmentService::drop(&db, Uuid::new_v4())
        .await
        .expect("drop unknown"));
    assert_eq!(seats(&db, course.id).await, 1);
}

#[tokio::test]
async fn double_drop_is_false_and_decrements_once() {
    let db = setup().await;
    let student = make_user(&db, "alice", Role::Student).await;
    let course = make_course(&db, "CS101", 3, 30).await;
    let e = EnrollmentService::enroll(&db, student.id, course.id)
        .await
        .expect("enroll");

    assert!(EnrollmentService::drop(&db, e.id).await.expect("first drop"));
    assert!(!EnrollmentService::drop(&db, e.id).await.expect("second drop"));
    assert_eq!(seats(&db, course.id).await, 0);
}

#[tokio::test]
async fn completion_records_grade_and_keeps_the_seat() {
    let db = setup().await;
    let student = make_user(&db, "alice", Role::Student).await;
    let course = make_course(&db, "CS101", 3, 30).await;
    let e = EnrollmentService::enroll(&db, student.id, course.id)
        .await
        .expect("enroll");

    let completed = EnrollmentService::complete(&db, e.id, LetterGrade::A)
        .await
        .expect("complete");
    assert_eq!(completed.status, EnrollmentStatus::Completed.as_str());
    assert_eq!(completed.grade.as_deref(), Some("A"));
    assert_eq!(seats(&db, course.id).await, 1);

    // A finished enrollment can be neither dropped nor re-finalized.
    assert!(!EnrollmentService::drop(&db, e.id).await.expect("drop"));
    assert!(matches!(
        EnrollmentService::complete(&db, e.id, LetterGrade::B).await,
        Err(EnrollError::NotCurrentlyEnrolled)
    ));
}

#[tokio::test]
async fn roster_lists_only_enrolled_students() {
    let db = setup().await;
    let course = make_course(&db, "CS101", 3, 30).await;
    let alice = make_user(&db, "alice", Role::Student).await;
    let bob = make_user(&db, "bob", Role::Student).await;

    EnrollmentService::enroll(&db, alice.id, course.id)
        .await
        .expect("enroll alice");
    let e = EnrollmentService::enroll(&db, bob.id, course.id)
        .await
        .expect("enroll bob");
    EnrollmentService::drop(&db, e.id).await.expect("drop bob");

    let roster = EnrollmentService::roster(&db, course.id)
        .await
        .expect("roster");
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].1.username, "alice");
}
