use crate::auth::AuthSession;
use crate::dtos::course::{
    CourseDetailResponse, CourseQueryParams, CourseResponse, CreateCourseRequest,
    PaginatedCoursesResponse, PaginationMeta, PrerequisiteRef, PrerequisitesRequest, RosterEntry,
    UpdateCourseRequest,
};
use crate::errors::ApiError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::entities::courses;
use database::errors::CatalogError;
use database::services::{
    catalog::{CatalogService, CourseFilter, CourseUpdate, NewCourse},
    enrollment::EnrollmentService,
};
use models::{grading::GradeWeights, options::CourseOptions};
use sea_orm::{EntityTrait, prelude::Uuid};

/// Get paginated list of courses
#[utoipa::path(
    get,
    path = "/courses",
    params(CourseQueryParams),
    responses(
        (status = 200, description = "List of courses retrieved successfully", body = PaginatedCoursesResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Courses"
)]
pub async fn get_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseQueryParams>,
) -> Result<Json<PaginatedCoursesResponse>, ApiError> {
    let filter = CourseFilter {
        search: params.search,
        department: params.department,
        season: params.season,
        year: params.year,
        active: params.active,
    };

    let (courses, total_items) =
        CatalogService::get_courses_paginated(&state.db, params.page, params.per_page, filter)
            .await?;

    let total_pages = total_items.div_ceil(params.per_page.max(1));
    let pagination = PaginationMeta {
        page: params.page,
        per_page: params.per_page,
        total_pages,
        total_items,
        has_next: params.page < total_pages,
        has_prev: params.page > 1,
    };

    Ok(Json(PaginatedCoursesResponse {
        courses: courses.into_iter().map(CourseResponse::from).collect(),
        pagination,
    }))
}

/// Get a specific course with prerequisites and instructor
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course found", body = CourseDetailResponse),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn get_course_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseDetailResponse>, ApiError> {
    let (course, prerequisites, instructor) = CatalogService::get_course_detail(&state.db, id)
        .await?
        .ok_or(ApiError::Catalog(CatalogError::NotFound))?;

    Ok(Json(to_detail_response(course, prerequisites, instructor)))
}

/// Create a course (staff/admin)
#[utoipa::path(
    post,
    path = "/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 403, description = "Caller may not manage the catalog"),
        (status = 409, description = "Course code already exists"),
        (status = 422, description = "Invalid grade weights")
    ),
    security(("bearer" = [])),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    session: AuthSession,
    Json(request): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    session.require_staff()?;

    let course = CatalogService::create_course(
        &state.db,
        NewCourse {
            code: request.code,
            title: request.title,
            description: request.description,
            credits: request.credits,
            max_seats: request.max_seats,
            season: request.season,
            year: request.year,
            instructor_id: request.instructor_id,
            weights: request.weights,
            options: request.options,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(course.into())))
}

/// Partially update a course (staff/admin)
#[utoipa::path(
    put,
    path = "/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 403, description = "Caller may not manage the catalog"),
        (status = 404, description = "Course not found"),
        (status = 422, description = "Seat cap below enrollment or invalid weights")
    ),
    security(("bearer" = [])),
    tag = "Courses"
)]
pub async fn update_course(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCourseRequest>,
) -> Result<Json<CourseResponse>, ApiError> {
    session.require_staff()?;

    let course = CatalogService::update_course(
        &state.db,
        id,
        CourseUpdate {
            title: request.title,
            description: request.description,
            max_seats: request.max_seats,
            instructor_id: request.instructor_id,
            active: request.active,
            weights: request.weights,
            options: request.options,
        },
    )
    .await?;

    Ok(Json(course.into()))
}

/// Replace a course's prerequisite set (staff/admin)
#[utoipa::path(
    put,
    path = "/courses/{id}/prerequisites",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = PrerequisitesRequest,
    responses(
        (status = 204, description = "Prerequisites replaced"),
        (status = 403, description = "Caller may not manage the catalog"),
        (status = 404, description = "Course not found"),
        (status = 422, description = "Unknown prerequisite or self-reference")
    ),
    security(("bearer" = [])),
    tag = "Courses"
)]
pub async fn set_prerequisites(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<Uuid>,
    Json(request): Json<PrerequisitesRequest>,
) -> Result<StatusCode, ApiError> {
    session.require_staff()?;
    CatalogService::set_prerequisites(&state.db, id, request.prerequisite_ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// ENROLLED students of a course (instructor or staff/admin)
#[utoipa::path(
    get,
    path = "/courses/{id}/roster",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Roster retrieved", body = [RosterEntry]),
        (status = 403, description = "Caller does not teach this course"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer" = [])),
    tag = "Courses"
)]
pub async fn get_roster(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RosterEntry>>, ApiError> {
    ensure_course_instructor(&state, &session, id).await?;

    let roster = EnrollmentService::roster(&state.db, id).await?;
    Ok(Json(
        roster
            .into_iter()
            .map(|(enrollment, student)| RosterEntry {
                enrollment_id: enrollment.id,
                student_id: student.id,
                username: student.username,
                full_name: student.full_name,
            })
            .collect(),
    ))
}

/// Allows the course's instructor and staff/admin through; everyone else
/// is rejected. 404s when the course does not exist.
pub(crate) async fn ensure_course_instructor(
    state: &AppState,
    session: &AuthSession,
    course_id: Uuid,
) -> Result<courses::Model, ApiError> {
    let course = database::entities::courses::Entity::find_by_id(course_id)
        .one(&state.db)
        .await
        .map_err(CatalogError::from)?
        .ok_or(ApiError::Catalog(CatalogError::NotFound))?;

    if session.role.is_staff() || course.instructor_id == Some(session.user_id) {
        Ok(course)
    } else {
        Err(ApiError::Forbidden)
    }
}

fn to_detail_response(
    course: courses::Model,
    prerequisites: Vec<(Uuid, String)>,
    instructor: Option<String>,
) -> CourseDetailResponse {
    let weights = GradeWeights {
        assignments: course.weight_assignments,
        quizzes: course.weight_quizzes,
        exams: course.weight_exams,
    };
    let options: CourseOptions =
        serde_json::from_value(course.options.clone()).unwrap_or_default();

    CourseDetailResponse {
        course: course.into(),
        instructor,
        prerequisites: prerequisites
            .into_iter()
            .map(|(id, code)| PrerequisiteRef { id, code })
            .collect(),
        weights,
        options,
    }
}
