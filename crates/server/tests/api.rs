use axum_test::TestServer;
use migration::{Migrator, MigratorTrait};
use models::role::Role;
use sea_orm::{Database, DatabaseConnection};
use serde_json::{Value, json};
use server::{AppState, app};

async fn spawn() -> (TestServer, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("sqlite connect");
    Migrator::up(&db, None).await.expect("migrations");
    let server = TestServer::new(app(AppState { db: db.clone() })).expect("test server");
    (server, db)
}

/// Seeds an account directly and logs it in, returning the bearer token.
async fn login_as(server: &TestServer, db: &DatabaseConnection, username: &str, role: Role) -> String {
    use database::services::user::{NewUser, UserService};

    UserService::create_user(
        db,
        NewUser {
            username: username.to_string(),
            full_name: format!("Test {username}"),
            email: format!("{username}@example.edu"),
            password_hash: server::auth::hash_password("hunter2").expect("hash"),
            role,
        },
    )
    .await
    .expect("seed user");

    let response = server
        .post("/auth/login")
        .json(&json!({ "username": username, "password": "hunter2" }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["token"]
        .as_str()
        .expect("token")
        .to_string()
}

async fn create_course(server: &TestServer, staff_token: &str, code: &str, credits: i16, max_seats: i32) -> String {
    let response = server
        .post("/courses")
        .authorization_bearer(staff_token)
        .json(&json!({
            "code": code,
            "title": format!("Course {code}"),
            "credits": credits,
            "max_seats": max_seats,
            "season": "Fall",
            "year": 2025,
            "weights": { "assignments": 40.0, "quizzes": 20.0, "exams": 40.0 },
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_str().expect("id").to_string()
}

#[tokio::test]
async fn health_is_open() {
    let (server, _db) = spawn().await;
    server.get("/health").await.assert_status_ok();
}

#[tokio::test]
async fn register_login_me_round_trip() {
    let (server, _db) = spawn().await;

    let response = server
        .post("/auth/register")
        .json(&json!({
            "username": "alice",
            "full_name": "Alice Liddell",
            "email": "alice@example.edu",
            "password": "hunter2",
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let created = response.json::<Value>();
    assert_eq!(created["role"], "STUDENT");

    let login = server
        .post("/auth/login")
        .json(&json!({ "username": "alice", "password": "hunter2" }))
        .await;
    login.assert_status_ok();
    let token = login.json::<Value>()["token"].as_str().expect("token").to_string();

    let me = server.get("/auth/me").authorization_bearer(&token).await;
    me.assert_status_ok();
    assert_eq!(me.json::<Value>()["username"], "alice");
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let (server, db) = spawn().await;
    login_as(&server, &db, "alice", Role::Student).await;

    let response = server
        .post("/auth/login")
        .json(&json!({ "username": "alice", "password": "wrong" }))
        .await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn logout_invalidates_the_token() {
    let (server, db) = spawn().await;
    let token = login_as(&server, &db, "alice", Role::Student).await;

    server
        .post("/auth/logout")
        .authorization_bearer(&token)
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);
    server
        .get("/auth/me")
        .authorization_bearer(&token)
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn students_cannot_create_courses() {
    let (server, db) = spawn().await;
    let token = login_as(&server, &db, "alice", Role::Student).await;

    let response = server
        .post("/courses")
        .authorization_bearer(&token)
        .json(&json!({
            "code": "CS101",
            "title": "Intro",
            "credits": 3,
            "max_seats": 30,
            "season": "Fall",
            "year": 2025,
        }))
        .await;
    response.assert_status_forbidden();
}

#[tokio::test]
async fn catalog_listing_is_public() {
    let (server, db) = spawn().await;
    let staff = login_as(&server, &db, "registrar", Role::Staff).await;
    create_course(&server, &staff, "CS101", 3, 30).await;

    let response = server.get("/courses").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["pagination"]["total_items"], 1);
    assert_eq!(body["courses"][0]["code"], "CS101");
}

#[tokio::test]
async fn enroll_and_drop_round_trip() {
    let (server, db) = spawn().await;
    let staff = login_as(&server, &db, "registrar", Role::Staff).await;
    let course_id = create_course(&server, &staff, "CS101", 3, 2).await;
    let student = login_as(&server, &db, "alice", Role::Student).await;

    let enroll = server
        .post("/enrollments")
        .authorization_bearer(&student)
        .json(&json!({ "course_id": course_id }))
        .await;
    enroll.assert_status(axum::http::StatusCode::CREATED);
    let enrollment_id = enroll.json::<Value>()["id"].as_str().expect("id").to_string();

    let detail = server.get(&format!("/courses/{course_id}")).await;
    assert_eq!(detail.json::<Value>()["current_seats"], 1);

    let drop = server
        .delete(&format!("/enrollments/{enrollment_id}"))
        .authorization_bearer(&student)
        .await;
    drop.assert_status_ok();
    assert_eq!(drop.json::<Value>()["dropped"], true);

    let detail = server.get(&format!("/courses/{course_id}")).await;
    assert_eq!(detail.json::<Value>()["current_seats"], 0);
}

#[tokio::test]
async fn full_course_returns_conflict() {
    let (server, db) = spawn().await;
    let staff = login_as(&server, &db, "registrar", Role::Staff).await;
    let course_id = create_course(&server, &staff, "CS101", 3, 1).await;

    let first = login_as(&server, &db, "alice", Role::Student).await;
    server
        .post("/enrollments")
        .authorization_bearer(&first)
        .json(&json!({ "course_id": course_id }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let second = login_as(&server, &db, "bob", Role::Student).await;
    let response = server
        .post("/enrollments")
        .authorization_bearer(&second)
        .json(&json!({ "course_id": course_id }))
        .await;
    response.assert_status(axum::http::StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"], "course is full");
}

#[tokio::test]
async fn missing_prerequisites_are_reported() {
    let (server, db) = spawn().await;
    let staff = login_as(&server, &db, "registrar", Role::Staff).await;
    let intro = create_course(&server, &staff, "CS101", 3, 30).await;
    let advanced = create_course(&server, &staff, "CS301", 3, 30).await;

    server
        .put(&format!("/courses/{advanced}/prerequisites"))
        .authorization_bearer(&staff)
        .json(&json!({ "prerequisite_ids": [intro] }))
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);

    let student = login_as(&server, &db, "alice", Role::Student).await;
    let response = server
        .post("/enrollments")
        .authorization_bearer(&student)
        .json(&json!({ "course_id": advanced }))
        .await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["missing"], json!(["CS101"]));
}

#[tokio::test]
async fn credit_cap_is_enforced_over_the_api() {
    let (server, db) = spawn().await;
    let staff = login_as(&server, &db, "registrar", Role::Staff).await;
    let student = login_as(&server, &db, "alice", Role::Student).await;

    for (code, credits) in [("CS101", 6), ("CS102", 6), ("CS103", 6)] {
        let course_id = create_course(&server, &staff, code, credits, 30).await;
        server
            .post("/enrollments")
            .authorization_bearer(&student)
            .json(&json!({ "course_id": course_id }))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }

    let over = create_course(&server, &staff, "CS104", 1, 30).await;
    let response = server
        .post("/enrollments")
        .authorization_bearer(&student)
        .json(&json!({ "course_id": over }))
        .await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn students_cannot_enroll_each_other() {
    let (server, db) = spawn().await;
    let staff = login_as(&server, &db, "registrar", Role::Staff).await;
    let course_id = create_course(&server, &staff, "CS101", 3, 30).await;
    let _alice = login_as(&server, &db, "alice", Role::Student).await;
    let bob = login_as(&server, &db, "bob", Role::Student).await;

    let alice_id = database::services::user::UserService::find_by_username(&db, "alice")
        .await
        .expect("query")
        .expect("alice exists")
        .id;

    let response = server
        .post("/enrollments")
        .authorization_bearer(&bob)
        .json(&json!({ "course_id": course_id, "student_id": alice_id }))
        .await;
    response.assert_status_forbidden();
}

#[tokio::test]
async fn only_admins_create_staff_accounts() {
    let (server, db) = spawn().await;
    let staff = login_as(&server, &db, "registrar", Role::Staff).await;

    let body = json!({
        "username": "prof",
        "full_name": "New Professor",
        "email": "prof@example.edu",
        "password": "hunter2",
        "role": "PROFESSOR",
    });
    server
        .post("/users")
        .authorization_bearer(&staff)
        .json(&body)
        .await
        .assert_status_forbidden();

    let admin = login_as(&server, &db, "root", Role::Admin).await;
    server
        .post("/users")
        .authorization_bearer(&admin)
        .json(&body)
        .await
        .assert_status(axum::http::StatusCode::CREATED);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (server, _db) = spawn().await;
    let response = server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();
    let doc = response.json::<Value>();
    assert!(doc["paths"]["/enrollments"].is_object());
}
