use chrono::NaiveDateTime;
use database::entities::assessments;
use database::services::grade::{CategoryBreakdown, TranscriptRow};
use models::{
    grading::LetterGrade, options::AssessmentOptions, status::AssessmentCategory,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAssessmentRequest {
    pub title: String,
    #[schema(value_type = String)]
    pub category: AssessmentCategory,
    pub total_points: f64,
    pub due_at: Option<NaiveDateTime>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub options: AssessmentOptions,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssessmentResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub category: String,
    pub total_points: f64,
    pub due_at: Option<NaiveDateTime>,
}

impl From<assessments::Model> for AssessmentResponse {
    fn from(assessment: assessments::Model) -> Self {
        AssessmentResponse {
            id: assessment.id,
            course_id: assessment.course_id,
            title: assessment.title,
            category: assessment.category,
            total_points: assessment.total_points,
            due_at: assessment.due_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ScoreRequest {
    pub student_id: Uuid,
    pub points: f64,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct GradeQueryParams {
    pub student_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GradeResponse {
    #[schema(value_type = Vec<Object>)]
    pub categories: Vec<CategoryBreakdown>,
    pub percent: Option<f64>,
    #[schema(value_type = Option<String>)]
    pub letter: Option<LetterGrade>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TranscriptResponse {
    #[schema(value_type = Vec<Object>)]
    pub rows: Vec<TranscriptRow>,
    pub gpa: Option<f64>,
}
