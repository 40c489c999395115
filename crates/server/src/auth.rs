use crate::errors::ApiError;
use crate::state::AppState;
use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use database::services::user::UserService;
use models::role::Role;
use pbkdf2::{
    Pbkdf2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::{Rng, thread_rng};
use rand_core::OsRng;
use sha2::{Digest, Sha256};
use std::str::FromStr;
use uuid::Uuid;

pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Pbkdf2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| ApiError::Internal)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(hash) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Pbkdf2.verify_password(password.as_bytes(), &hash).is_ok()
}

/// Opaque bearer token: 32 random bytes, sha256'd and hex-encoded.
pub fn mint_token() -> String {
    let bytes: [u8; 32] = thread_rng().r#gen();
    let mut hasher: Sha256 = Digest::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// The authenticated caller, resolved once from the bearer token and
/// passed explicitly to whatever needs it. Role checks are explicit
/// methods rather than string comparisons scattered through handlers.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
}

impl AuthSession {
    pub fn require_staff(&self) -> Result<(), ApiError> {
        if self.role.is_staff() {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }

    pub fn require_role(&self, role: Role) -> Result<(), ApiError> {
        if self.role == role {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }

    /// The caller themselves, or any staff/admin.
    pub fn require_self_or_staff(&self, user_id: Uuid) -> Result<(), ApiError> {
        if self.user_id == user_id || self.role.is_staff() {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized)?;

        let user = UserService::resolve_session(&state.db, token).await?;
        let role = Role::from_str(&user.role).map_err(|_| ApiError::Internal)?;

        Ok(AuthSession {
            user_id: user.id,
            username: user.username,
            role,
        })
    }
}
