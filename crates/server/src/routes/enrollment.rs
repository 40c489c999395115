use crate::auth::AuthSession;
use crate::dtos::enrollment::{
    DroppedResponse, EnrollRequest, EnrollmentResponse, EnrollmentWithCourseResponse,
    FinalizeRequest,
};
use crate::errors::ApiError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::entities::enrollments;
use database::errors::EnrollError;
use database::services::enrollment::EnrollmentService;
use sea_orm::{EntityTrait, prelude::Uuid};

/// Enroll a student in a course
///
/// Students enroll themselves; staff may enroll a named student. The
/// admission checks run in a fixed order: seats, prerequisites,
/// duplicate enrollment, credit cap.
#[utoipa::path(
    post,
    path = "/enrollments",
    request_body = EnrollRequest,
    responses(
        (status = 201, description = "Enrollment created", body = EnrollmentResponse),
        (status = 403, description = "Students may only enroll themselves"),
        (status = 404, description = "Course or student not found"),
        (status = 409, description = "Course full or already enrolled"),
        (status = 422, description = "Prerequisites not met or credit limit exceeded")
    ),
    security(("bearer" = [])),
    tag = "Enrollments"
)]
pub async fn create_enrollment(
    State(state): State<AppState>,
    session: AuthSession,
    Json(request): Json<EnrollRequest>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), ApiError> {
    let student_id = request.student_id.unwrap_or(session.user_id);
    session.require_self_or_staff(student_id)?;

    let enrollment = EnrollmentService::enroll(&state.db, student_id, request.course_id).await?;
    Ok((StatusCode::CREATED, Json(enrollment.into())))
}

/// Drop an enrollment
///
/// Responds `{ "dropped": false }` for ids that do not exist or are not
/// currently ENROLLED; that is not an error.
#[utoipa::path(
    delete,
    path = "/enrollments/{id}",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Drop attempted", body = DroppedResponse),
        (status = 403, description = "Not the student's own enrollment")
    ),
    security(("bearer" = [])),
    tag = "Enrollments"
)]
pub async fn drop_enrollment(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<Uuid>,
) -> Result<Json<DroppedResponse>, ApiError> {
    // Ownership check only applies when the row exists; unknown ids
    // fall through to the boolean contract.
    if let Some(enrollment) = enrollments::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(EnrollError::from)?
    {
        session.require_self_or_staff(enrollment.student_id)?;
    }

    let dropped = EnrollmentService::drop(&state.db, id).await?;
    Ok(Json(DroppedResponse { dropped }))
}

/// The calling student's enrollments with course data
#[utoipa::path(
    get,
    path = "/enrollments",
    responses(
        (status = 200, description = "Enrollments retrieved", body = [EnrollmentWithCourseResponse])
    ),
    security(("bearer" = [])),
    tag = "Enrollments"
)]
pub async fn list_enrollments(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<Vec<EnrollmentWithCourseResponse>>, ApiError> {
    let rows = EnrollmentService::for_student(&state.db, session.user_id).await?;
    Ok(Json(
        rows.into_iter()
            .map(EnrollmentWithCourseResponse::from)
            .collect(),
    ))
}

/// Complete an enrollment with a letter grade (instructor or staff)
#[utoipa::path(
    post,
    path = "/enrollments/{id}/finalize",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    request_body = FinalizeRequest,
    responses(
        (status = 200, description = "Enrollment completed", body = EnrollmentResponse),
        (status = 403, description = "Caller does not teach this course"),
        (status = 404, description = "Enrollment not found"),
        (status = 409, description = "Enrollment is not currently active")
    ),
    security(("bearer" = [])),
    tag = "Enrollments"
)]
pub async fn finalize_enrollment(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<Uuid>,
    Json(request): Json<FinalizeRequest>,
) -> Result<Json<EnrollmentResponse>, ApiError> {
    let enrollment = enrollments::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(EnrollError::from)?
        .ok_or(ApiError::Enroll(EnrollError::NotFound("enrollment")))?;
    super::course::ensure_course_instructor(&state, &session, enrollment.course_id).await?;

    let completed = EnrollmentService::complete(&state.db, id, request.grade).await?;
    Ok(Json(completed.into()))
}
