use crate::entities::{sessions, users};
use crate::errors::AuthError;
use chrono::{Duration, Utc};
use models::role::Role;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

pub struct UserService;

impl UserService {
    /// Session lifetime for freshly minted tokens.
    pub const SESSION_TTL_HOURS: i64 = 48;

    pub async fn create_user(
        db: &DatabaseConnection,
        new: NewUser,
    ) -> Result<users::Model, AuthError> {
        let existing = users::Entity::find()
            .filter(users::Column::Username.eq(new.username.clone()))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let id = Uuid::new_v4();
        users::Entity::insert(users::ActiveModel {
            id: Set(id),
            username: Set(new.username),
            full_name: Set(new.full_name),
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            role: Set(new.role.as_str().to_owned()),
            created_at: Set(Utc::now().naive_utc()),
        })
        .exec(db)
        .await?;

        users::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(AuthError::NotFound)
    }

    pub async fn find_by_username(
        db: &DatabaseConnection,
        username: &str,
    ) -> Result<Option<users::Model>, AuthError> {
        Ok(users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(db)
            .await?)
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        user_id: Uuid,
    ) -> Result<Option<users::Model>, AuthError> {
        Ok(users::Entity::find_by_id(user_id).one(db).await?)
    }

    pub async fn create_session(
        db: &DatabaseConnection,
        user_id: Uuid,
        token: String,
    ) -> Result<sessions::Model, AuthError> {
        let now = Utc::now().naive_utc();
        let session = sessions::ActiveModel {
            token: Set(token.clone()),
            user_id: Set(user_id),
            created_at: Set(now),
            expires_at: Set(now + Duration::hours(Self::SESSION_TTL_HOURS)),
        };
        sessions::Entity::insert(session).exec(db).await?;
        sessions::Entity::find_by_id(token)
            .one(db)
            .await?
            .ok_or(AuthError::InvalidSession)
    }

    /// Resolves a presented token to its user. Expired session rows are
    /// deleted on sight.
    pub async fn resolve_session(
        db: &DatabaseConnection,
        token: &str,
    ) -> Result<users::Model, AuthError> {
        let session = sessions::Entity::find_by_id(token.to_owned())
            .one(db)
            .await?
            .ok_or(AuthError::InvalidSession)?;

        if session.expires_at < Utc::now().naive_utc() {
            sessions::Entity::delete_by_id(session.token).exec(db).await?;
            return Err(AuthError::SessionExpired);
        }

        users::Entity::find_by_id(session.user_id)
            .one(db)
            .await?
            .ok_or(AuthError::InvalidSession)
    }

    pub async fn delete_session(db: &DatabaseConnection, token: &str) -> Result<bool, AuthError> {
        let result = sessions::Entity::delete_by_id(token.to_owned())
            .exec(db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
