use crate::auth::AuthSession;
use crate::dtos::gradebook::{
    AssessmentResponse, CreateAssessmentRequest, GradeQueryParams, GradeResponse, ScoreRequest,
    TranscriptResponse,
};
use crate::errors::ApiError;
use crate::routes::course::ensure_course_instructor;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::grade::{GradeService, NewAssessment};
use sea_orm::prelude::Uuid;

/// Create an assessment for a course (instructor or staff)
#[utoipa::path(
    post,
    path = "/courses/{id}/assessments",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = CreateAssessmentRequest,
    responses(
        (status = 201, description = "Assessment created", body = AssessmentResponse),
        (status = 403, description = "Caller does not teach this course"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer" = [])),
    tag = "Gradebook"
)]
pub async fn create_assessment(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateAssessmentRequest>,
) -> Result<(StatusCode, Json<AssessmentResponse>), ApiError> {
    ensure_course_instructor(&state, &session, id).await?;

    let assessment = GradeService::create_assessment(
        &state.db,
        NewAssessment {
            course_id: id,
            title: request.title,
            category: request.category,
            total_points: request.total_points,
            due_at: request.due_at,
            options: request.options,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(assessment.into())))
}

/// List a course's assessments
#[utoipa::path(
    get,
    path = "/courses/{id}/assessments",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Assessments retrieved", body = [AssessmentResponse])
    ),
    security(("bearer" = [])),
    tag = "Gradebook"
)]
pub async fn list_assessments(
    State(state): State<AppState>,
    _session: AuthSession,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AssessmentResponse>>, ApiError> {
    let assessments = GradeService::list_assessments(&state.db, id).await?;
    Ok(Json(
        assessments.into_iter().map(AssessmentResponse::from).collect(),
    ))
}

/// Record or overwrite a student's score (instructor or staff)
#[utoipa::path(
    put,
    path = "/assessments/{id}/scores",
    params(("id" = Uuid, Path, description = "Assessment ID")),
    request_body = ScoreRequest,
    responses(
        (status = 204, description = "Score recorded"),
        (status = 403, description = "Caller does not teach this course"),
        (status = 404, description = "Assessment or student not found"),
        (status = 422, description = "Score negative or above total points")
    ),
    security(("bearer" = [])),
    tag = "Gradebook"
)]
pub async fn record_score(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<Uuid>,
    Json(request): Json<ScoreRequest>,
) -> Result<StatusCode, ApiError> {
    let assessment = GradeService::find_assessment(&state.db, id).await?;
    ensure_course_instructor(&state, &session, assessment.course_id).await?;

    GradeService::record_score(&state.db, id, request.student_id, request.points).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Per-category breakdown and weighted percentage for a student
#[utoipa::path(
    get,
    path = "/courses/{id}/grade",
    params(
        ("id" = Uuid, Path, description = "Course ID"),
        GradeQueryParams
    ),
    responses(
        (status = 200, description = "Grade computed", body = GradeResponse),
        (status = 403, description = "Not the student's own grade"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer" = [])),
    tag = "Gradebook"
)]
pub async fn course_grade(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<Uuid>,
    Query(params): Query<GradeQueryParams>,
) -> Result<Json<GradeResponse>, ApiError> {
    // Students see their own grade; instructors and staff see any.
    if session.user_id != params.student_id {
        ensure_course_instructor(&state, &session, id).await?;
    }

    let grade = GradeService::course_grade(&state.db, params.student_id, id).await?;
    Ok(Json(GradeResponse {
        categories: grade.categories,
        percent: grade.percent,
        letter: grade.letter,
    }))
}

/// Transcript rows and GPA for a student (self or staff)
#[utoipa::path(
    get,
    path = "/students/{id}/transcript",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Transcript retrieved", body = TranscriptResponse),
        (status = 403, description = "Not the student's own transcript")
    ),
    security(("bearer" = [])),
    tag = "Gradebook"
)]
pub async fn transcript(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<Uuid>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    session.require_self_or_staff(id)?;

    let transcript = GradeService::transcript(&state.db, id).await?;
    Ok(Json(TranscriptResponse {
        rows: transcript.rows,
        gpa: transcript.gpa,
    }))
}
