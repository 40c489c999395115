use crate::auth::{self, AuthSession};
use crate::dtos::auth::{CreateUserRequest, UserResponse};
use crate::errors::ApiError;
use crate::routes::auth::to_response;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use database::services::user::{NewUser, UserService};
use models::role::Role;

/// Create an account of any role (admin only)
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 403, description = "Caller is not an admin"),
        (status = 409, description = "Username already taken")
    ),
    security(("bearer" = [])),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    session: AuthSession,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    session.require_role(Role::Admin)?;

    let password_hash = auth::hash_password(&request.password)?;
    let user = UserService::create_user(
        &state.db,
        NewUser {
            username: request.username,
            full_name: request.full_name,
            email: request.email,
            password_hash,
            role: request.role,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(to_response(user)?)))
}
