use chrono::NaiveDateTime;
use database::entities::{courses, enrollments};
use models::grading::LetterGrade;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct EnrollRequest {
    pub course_id: Uuid,
    /// Staff may enroll a named student; students enroll themselves.
    pub student_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub status: String,
    pub grade: Option<String>,
    pub enrolled_at: NaiveDateTime,
}

impl From<enrollments::Model> for EnrollmentResponse {
    fn from(enrollment: enrollments::Model) -> Self {
        EnrollmentResponse {
            id: enrollment.id,
            student_id: enrollment.student_id,
            course_id: enrollment.course_id,
            status: enrollment.status,
            grade: enrollment.grade,
            enrolled_at: enrollment.enrolled_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentWithCourseResponse {
    #[serde(flatten)]
    pub enrollment: EnrollmentResponse,
    pub course_code: String,
    pub course_title: String,
    pub credits: i16,
}

impl From<(enrollments::Model, courses::Model)> for EnrollmentWithCourseResponse {
    fn from((enrollment, course): (enrollments::Model, courses::Model)) -> Self {
        EnrollmentWithCourseResponse {
            enrollment: enrollment.into(),
            course_code: course.code,
            course_title: course.title,
            credits: course.credits,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DroppedResponse {
    pub dropped: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FinalizeRequest {
    #[schema(value_type = String)]
    pub grade: LetterGrade,
}
