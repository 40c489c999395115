mod common;

use common::{make_course, make_user, setup};
use database::errors::CatalogError;
use database::services::catalog::{CatalogService, CourseFilter, CourseUpdate, NewCourse};
use database::services::enrollment::EnrollmentService;
use models::{grading::GradeWeights, options::CourseOptions, role::Role, term::Season};

#[tokio::test]
async fn duplicate_code_is_rejected() {
    let db = setup().await;
    make_course(&db, "CS101", 3, 30).await;

    let err = CatalogService::create_course(
        &db,
        NewCourse {
            code: "CS101".to_string(),
            title: "Duplicate".to_string(),
            description: None,
            credits: 3,
            max_seats: 10,
            season: Season::Spring,
            year: 2026,
            instructor_id: None,
            weights: GradeWeights {
                assignments: 40.0,
                quizzes: 20.0,
                exams: 40.0,
            },
            options: CourseOptions::default(),
        },
    )
    .await
    .expect_err("code is taken");
    assert!(matches!(err, CatalogError::DuplicateCode(code) if code == "CS101"));
}

#[tokio::test]
async fn weights_must_sum_to_one_hundred() {
    let db = setup().await;
    let err = CatalogService::create_course(
        &db,
        NewCourse {
            code: "CS101".to_string(),
            title: "Bad weights".to_string(),
            description: None,
            credits: 3,
            max_seats: 10,
            season: Season::Fall,
            year: 2025,
            instructor_id: None,
            weights: GradeWeights {
                assignments: 50.0,
                quizzes: 20.0,
                exams: 40.0,
            },
            options: CourseOptions::default(),
        },
    )
    .await
    .expect_err("110 is not 100");
    assert!(matches!(err, CatalogError::InvalidWeights { .. }));
}

#[tokio::test]
async fn partial_update_leaves_other_fields_alone() {
    let db = setup().await;
    let course = make_course(&db, "CS101", 3, 30).await;

    let updated = CatalogService::update_course(
        &db,
        course.id,
        CourseUpdate {
            title: Some("Renamed".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("update");

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.code, "CS101");
    assert_eq!(updated.max_seats, 30);
    assert!(updated.active);
}

#[tokio::test]
async fn update_can_clear_the_description() {
    let db = setup().await;
    let course = make_course(&db, "CS101", 3, 30).await;
    CatalogService::update_course(
        &db,
        course.id,
        CourseUpdate {
            description: Some(Some("temp".to_string())),
            ..Default::default()
        },
    )
    .await
    .expect("set description");

    let cleared = CatalogService::update_course(
        &db,
        course.id,
        CourseUpdate {
            description: Some(None),
            ..Default::default()
        },
    )
    .await
    .expect("clear description");
    assert_eq!(cleared.description, None);
}

#[tokio::test]
async fn seat_cap_cannot_shrink_below_enrollment() {
    let db = setup().await;
    let course = make_course(&db, "CS101", 3, 30).await;
    for name in ["alice", "bob"] {
        let student = make_user(&db, name, Role::Student).await;
        EnrollmentService::enroll(&db, student.id, course.id)
            .await
            .expect("enroll");
    }

    let err = CatalogService::update_course(
        &db,
        course.id,
        CourseUpdate {
            max_seats: Some(1),
            ..Default::default()
        },
    )
    .await
    .expect_err("two students are enrolled");
    assert!(matches!(
        err,
        CatalogError::SeatCapBelowEnrollment {
            requested: 1,
            enrolled: 2,
        }
    ));

    // Shrinking down to exactly the enrollment count is fine.
    CatalogService::update_course(
        &db,
        course.id,
        CourseUpdate {
            max_seats: Some(2),
            ..Default::default()
        },
    )
    .await
    .expect("cap equals enrollment");
}

#[tokio::test]
async fn self_prerequisite_is_rejected() {
    let db = setup().await;
    let course = make_course(&db, "CS101", 3, 30).await;
    let err = CatalogService::set_prerequisites(&db, course.id, vec![course.id])
        .await
        .expect_err("self reference");
    assert!(matches!(err, CatalogError::SelfPrerequisite));
}

#[tokio::test]
async fn unknown_prerequisite_is_rejected() {
    let db = setup().await;
    let course = make_course(&db, "CS101", 3, 30).await;
    let bogus = uuid::Uuid::new_v4();
    let err = CatalogService::set_prerequisites(&db, course.id, vec![bogus])
        .await
        .expect_err("unknown id");
    assert!(matches!(err, CatalogError::UnknownPrerequisite(id) if id == bogus));
}

#[tokio::test]
async fn set_prerequisites_replaces_the_whole_set() {
    let db = setup().await;
    let a = make_course(&db, "CS101", 3, 30).await;
    let b = make_course(&db, "CS102", 3, 30).await;
    let target = make_course(&db, "CS301", 3, 30).await;

    CatalogService::set_prerequisites(&db, target.id, vec![a.id, b.id])
        .await
        .expect("set two");
    CatalogService::set_prerequisites(&db, target.id, vec![b.id])
        .await
        .expect("replace with one");

    let (_, prereqs, _) = CatalogService::get_course_detail(&db, target.id)
        .await
        .expect("detail")
        .expect("course exists");
    assert_eq!(prereqs.len(), 1);
    assert_eq!(prereqs[0].1, "CS102");
}

#[tokio::test]
async fn pagination_and_filters() {
    let db = setup().await;
    make_course(&db, "CS101", 3, 30).await;
    make_course(&db, "CS102", 3, 30).await;
    let math = make_course(&db, "MATH201", 4, 30).await;

    let (page, total) = CatalogService::get_courses_paginated(
        &db,
        1,
        2,
        CourseFilter::default(),
    )
    .await
    .expect("page 1");
    assert_eq!(total, 3);
    assert_eq!(page.len(), 2);

    let (cs_only, cs_total) = CatalogService::get_courses_paginated(
        &db,
        1,
        10,
        CourseFilter {
            department: Some("CS".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("department filter");
    assert_eq!(cs_total, 2);
    assert!(cs_only.iter().all(|c| c.code.starts_with("CS")));

    // Deactivated courses drop out of the active-only listing.
    CatalogService::update_course(
        &db,
        math.id,
        CourseUpdate {
            active: Some(false),
            ..Default::default()
        },
    )
    .await
    .expect("deactivate");
    let (_, active_total) = CatalogService::get_courses_paginated(
        &db,
        1,
        10,
        CourseFilter {
            active: Some(true),
            ..Default::default()
        },
    )
    .await
    .expect("active filter");
    assert_eq!(active_total, 2);
}

#[tokio::test]
async fn search_matches_title_and_code() {
    let db = setup().await;
    make_course(&db, "CS101", 3, 30).await;
    make_course(&db, "BIO110", 3, 30).await;

    let (hits, total) = CatalogService::get_courses_paginated(
        &db,
        1,
        10,
        CourseFilter {
            search: Some("BIO".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("search");
    assert_eq!(total, 1);
    assert_eq!(hits[0].code, "BIO110");
}

#[tokio::test]
async fn inactive_courses_still_accept_enrollment() {
    let db = setup().await;
    let course = make_course(&db, "CS101", 3, 30).await;
    CatalogService::update_course(
        &db,
        course.id,
        CourseUpdate {
            active: Some(false),
            ..Default::default()
        },
    )
    .await
    .expect("deactivate");

    let student = make_user(&db, "alice", Role::Student).await;
    EnrollmentService::enroll(&db, student.id, course.id)
        .await
        .expect("the active flag only affects the catalog listing");
}
