use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::errors::{AuthError, CatalogError, EnrollError, FacilityError, GradeError};
use serde_json::json;
use thiserror::Error;

/// Unified HTTP error surface. Service errors convert in via `From` and
/// map to statuses in one place; handlers just use `?`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication required")]
    Unauthorized,

    #[error("insufficient permissions")]
    Forbidden,

    #[error(transparent)]
    Enroll(#[from] EnrollError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Grade(#[from] GradeError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Facility(#[from] FacilityError),

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Enroll(e) => match e {
                EnrollError::CourseFull
                | EnrollError::AlreadyEnrolled
                | EnrollError::NotCurrentlyEnrolled => StatusCode::CONFLICT,
                EnrollError::PrerequisitesNotMet { .. }
                | EnrollError::CreditLimitExceeded { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                EnrollError::NotFound(_) => StatusCode::NOT_FOUND,
                EnrollError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Catalog(e) => match e {
                CatalogError::DuplicateCode(_) => StatusCode::CONFLICT,
                CatalogError::SeatCapBelowEnrollment { .. }
                | CatalogError::InvalidWeights { .. }
                | CatalogError::UnknownPrerequisite(_)
                | CatalogError::SelfPrerequisite => StatusCode::UNPROCESSABLE_ENTITY,
                CatalogError::NotFound => StatusCode::NOT_FOUND,
                CatalogError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Grade(e) => match e {
                GradeError::InvalidTotalPoints { .. } | GradeError::ScoreOutOfRange { .. } => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                GradeError::NotFound(_) => StatusCode::NOT_FOUND,
                GradeError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Auth(e) => match e {
                AuthError::UsernameTaken => StatusCode::CONFLICT,
                AuthError::InvalidCredentials
                | AuthError::SessionExpired
                | AuthError::InvalidSession => StatusCode::UNAUTHORIZED,
                AuthError::NotFound => StatusCode::NOT_FOUND,
                AuthError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Facility(e) => match e {
                FacilityError::WindowInverted => StatusCode::UNPROCESSABLE_ENTITY,
                FacilityError::RoomConflict => StatusCode::CONFLICT,
                FacilityError::NotFound(_) => StatusCode::NOT_FOUND,
                FacilityError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("internal error: {self}");
        } else {
            log::debug!("request failed: {self}");
        }

        // Prerequisite failures carry the missing course codes.
        let body = match &self {
            ApiError::Enroll(EnrollError::PrerequisitesNotMet { missing }) => json!({
                "error": self.to_string(),
                "missing": missing,
            }),
            _ if status == StatusCode::INTERNAL_SERVER_ERROR => {
                json!({ "error": "internal server error" })
            }
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
