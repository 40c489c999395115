mod common;

use chrono::{Duration, Utc};
use common::{make_user, setup};
use database::entities::sessions;
use database::errors::AuthError;
use database::services::user::{NewUser, UserService};
use models::role::Role;
use sea_orm::{ActiveValue::Set, EntityTrait};

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let db = setup().await;
    make_user(&db, "alice", Role::Student).await;

    let err = UserService::create_user(
        &db,
        NewUser {
            username: "alice".to_string(),
            full_name: "Other Alice".to_string(),
            email: "other@example.edu".to_string(),
            password_hash: "x".to_string(),
            role: Role::Student,
        },
    )
    .await
    .expect_err("username is taken");
    assert!(matches!(err, AuthError::UsernameTaken));
}

#[tokio::test]
async fn session_round_trip() {
    let db = setup().await;
    let user = make_user(&db, "alice", Role::Student).await;

    UserService::create_session(&db, user.id, "tok".to_string())
        .await
        .expect("create session");
    let resolved = UserService::resolve_session(&db, "tok")
        .await
        .expect("resolve");
    assert_eq!(resolved.id, user.id);

    assert!(UserService::delete_session(&db, "tok").await.expect("logout"));
    assert!(matches!(
        UserService::resolve_session(&db, "tok").await,
        Err(AuthError::InvalidSession)
    ));
}

#[tokio::test]
async fn expired_session_is_deleted_on_resolve() {
    let db = setup().await;
    let user = make_user(&db, "alice", Role::Student).await;
    let session = UserService::create_session(&db, user.id, "tok".to_string())
        .await
        .expect("create session");

    // Backdate the expiry.
    let mut active: sessions::ActiveModel = session.into();
    active.expires_at = Set(Utc::now().naive_utc() - Duration::minutes(1));
    sessions::Entity::update(active)
        .exec(&db)
        .await
        .expect("backdate");

    assert!(matches!(
        UserService::resolve_session(&db, "tok").await,
        Err(AuthError::SessionExpired)
    ));
    // The stale row is gone, so the next attempt reads as unknown.
    assert!(matches!(
        UserService::resolve_session(&db, "tok").await,
        Err(AuthError::InvalidSession)
    ));
}
