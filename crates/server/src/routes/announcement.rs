use crate::auth::AuthSession;
use crate::dtos::announcement::{AnnouncementResponse, PostAnnouncementRequest};
use crate::errors::ApiError;
use crate::routes::course::ensure_course_instructor;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use database::services::announcement::AnnouncementService;

/// Post an announcement
///
/// Staff and admins may post anywhere; professors only for courses they
/// teach. Omitting `course_id` makes the announcement campus-wide.
#[utoipa::path(
    post,
    path = "/announcements",
    request_body = PostAnnouncementRequest,
    responses(
        (status = 201, description = "Announcement posted", body = AnnouncementResponse),
        (status = 403, description = "Caller may not post here"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer" = [])),
    tag = "Announcements"
)]
pub async fn post_announcement(
    State(state): State<AppState>,
    session: AuthSession,
    Json(request): Json<PostAnnouncementRequest>,
) -> Result<(StatusCode, Json<AnnouncementResponse>), ApiError> {
    match request.course_id {
        Some(course_id) => {
            ensure_course_instructor(&state, &session, course_id).await?;
        }
        None => session.require_staff()?,
    }

    let announcement = AnnouncementService::post(
        &state.db,
        session.user_id,
        request.course_id,
        request.title,
        request.body,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(announcement.into())))
}

/// Announcements visible to the caller
///
/// Campus-wide posts for everyone, plus course-scoped posts for courses
/// the caller is enrolled in or teaches. Staff and admins see all.
#[utoipa::path(
    get,
    path = "/announcements",
    responses(
        (status = 200, description = "Announcements retrieved", body = [AnnouncementResponse])
    ),
    security(("bearer" = [])),
    tag = "Announcements"
)]
pub async fn list_announcements(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<Vec<AnnouncementResponse>>, ApiError> {
    let announcements =
        AnnouncementService::visible_for(&state.db, session.user_id, session.role)
            .await
            .map_err(database::errors::EnrollError::from)?;
    Ok(Json(
        announcements
            .into_iter()
            .map(AnnouncementResponse::from)
            .collect(),
    ))
}
