use crate::auth::{self, AuthSession};
use crate::dtos::auth::{LoginRequest, RegisterRequest, SessionResponse, UserResponse};
use crate::errors::ApiError;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use database::services::user::{NewUser, UserService};
use models::role::Role;
use std::str::FromStr;

/// Self-service student registration
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 409, description = "Username already taken")
    ),
    tag = "Authentication"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let password_hash = auth::hash_password(&request.password)?;
    let user = UserService::create_user(
        &state.db,
        NewUser {
            username: request.username,
            full_name: request.full_name,
            email: request.email,
            password_hash,
            role: Role::Student,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(to_response(user)?)))
}

/// Verify a password and issue a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session created", body = SessionResponse),
        (status = 401, description = "Invalid username or password")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let user = UserService::find_by_username(&state.db, &request.username)
        .await?
        .ok_or(ApiError::Auth(
            database::errors::AuthError::InvalidCredentials,
        ))?;

    if !auth::verify_password(&request.password, &user.password_hash) {
        return Err(ApiError::Auth(
            database::errors::AuthError::InvalidCredentials,
        ));
    }

    let token = auth::mint_token();
    let session = UserService::create_session(&state.db, user.id, token).await?;

    Ok(Json(SessionResponse {
        token: session.token,
        expires_at: session.expires_at,
    }))
}

/// Delete the presented session
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Session deleted"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer" = [])),
    tag = "Authentication"
)]
pub async fn logout(
    State(state): State<AppState>,
    _session: AuthSession,
    headers: axum::http::HeaderMap,
) -> Result<StatusCode, ApiError> {
    if let Some(token) = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
    {
        UserService::delete_session(&state.db, token).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Resolved identity of the presented token
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Authenticated user", body = UserResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer" = [])),
    tag = "Authentication"
)]
pub async fn me(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserService::find_by_id(&state.db, session.user_id)
        .await?
        .ok_or(ApiError::Auth(database::errors::AuthError::NotFound))?;
    Ok(Json(to_response(user)?))
}

pub(crate) fn to_response(
    user: database::entities::users::Model,
) -> Result<UserResponse, ApiError> {
    let role = Role::from_str(&user.role).map_err(|_| ApiError::Internal)?;
    Ok(UserResponse {
        id: user.id,
        username: user.username,
        full_name: user.full_name,
        email: user.email,
        role,
    })
}
