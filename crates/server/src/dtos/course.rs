use database::entities::courses;
use models::{grading::GradeWeights, options::CourseOptions, term::Season};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub credits: i16,
    pub max_seats: i32,
    pub current_seats: i32,
    pub season: String,
    pub year: i16,
    pub active: bool,
}

impl From<courses::Model> for CourseResponse {
    fn from(course: courses::Model) -> Self {
        CourseResponse {
            id: course.id,
            code: course.code,
            title: course.title,
            description: course.description,
            credits: course.credits,
            max_seats: course.max_seats,
            current_seats: course.current_seats,
            season: course.season,
            year: course.year,
            active: course.active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PrerequisiteRef {
    pub id: Uuid,
    pub code: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub instructor: Option<String>,
    pub prerequisites: Vec<PrerequisiteRef>,
    #[schema(value_type = Object)]
    pub weights: GradeWeights,
    #[schema(value_type = Object)]
    pub options: CourseOptions,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCoursesResponse {
    pub courses: Vec<CourseResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct CourseQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    pub search: Option<String>,
    pub department: Option<String>,
    #[schema(value_type = Option<String>)]
    #[param(value_type = Option<String>)]
    pub season: Option<Season>,
    pub year: Option<i16>,
    pub active: Option<bool>,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    20
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCourseRequest {
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub credits: i16,
    pub max_seats: i32,
    #[schema(value_type = String)]
    pub season: Season,
    pub year: i16,
    pub instructor_id: Option<Uuid>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub weights: GradeWeights,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub options: CourseOptions,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    // Absent = unchanged, null = cleared.
    #[serde(default, deserialize_with = "super::double_option")]
    pub description: Option<Option<String>>,
    pub max_seats: Option<i32>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub instructor_id: Option<Option<Uuid>>,
    pub active: Option<bool>,
    #[schema(value_type = Option<Object>)]
    pub weights: Option<GradeWeights>,
    #[schema(value_type = Option<Object>)]
    pub options: Option<CourseOptions>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PrerequisitesRequest {
    pub prerequisite_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RosterEntry {
    pub enrollment_id: Uuid,
    pub student_id: Uuid,
    pub username: String,
    pub full_name: String,
}
