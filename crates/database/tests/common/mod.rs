#![allow(dead_code)] // not every test binary uses every helper

use database::entities::courses;
use database::services::catalog::{CatalogService, NewCourse};
use database::services::user::{NewUser, UserService};
use database::entities::users;
use migration::{Migrator, MigratorTrait};
use models::{grading::GradeWeights, options::CourseOptions, role::Role, term::Season};
use sea_orm::{Database, DatabaseConnection};

pub async fn setup() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("sqlite connect");
    Migrator::up(&db, None).await.expect("migrations");
    db
}

pub async fn make_user(db: &DatabaseConnection, username: &str, role: Role) -> users::Model {
    UserService::create_user(
        db,
        NewUser {
            username: username.to_string(),
            full_name: format!("Test {username}"),
            email: format!("{username}@example.edu"),
            password_hash: "x".to_string(),
            role,
        },
    )
    .await
    .expect("create user")
}

pub async fn make_course(
    db: &DatabaseConnection,
    code: &str,
    credits: i16,
    max_seats: i32,
) -> courses::Model {
    CatalogService::create_course(
        db,
        NewCourse {
            code: code.to_string(),
            title: format!("Course {code}"),
            description: None,
            credits,
            max_seats,
            season: Season::Fall,
            year: 2025,
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
    .expect("create course")
}
