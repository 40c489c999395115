use sea_orm::DbErr;
use thiserror::Error;

/// Admission-control failures. The four validation variants mirror the
/// fixed check order in `EnrollmentService::enroll`; storage faults are
/// surfaced, never retried.
#[derive(Debug, Error)]
pub enum EnrollError {
    #[error("course is full")]
    CourseFull,

    #[error("missing prerequisites: {}", missing.join(", "))]
    PrerequisitesNotMet { missing: Vec<String> },

    #[error("student is already enrolled in this course")]
    AlreadyEnrolled,

    #[error("credit limit exceeded: {enrolled} enrolled + {requested} requested")]
    CreditLimitExceeded { enrolled: i16, requested: i16 },

    #[error("enrollment is not currently active")]
    NotCurrentlyEnrolled,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Db(#[from] DbErr),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("course code {0} already exists")]
    DuplicateCode(String),

    #[error("max_seats {requested} is below current enrollment {enrolled}")]
    SeatCapBelowEnrollment { requested: i32, enrolled: i32 },

    #[error("grade weights must sum to 100, got {sum}")]
    InvalidWeights { sum: f64 },

    #[error("unknown prerequisite course {0}")]
    UnknownPrerequisite(uuid::Uuid),

    #[error("a course cannot be its own prerequisite")]
    SelfPrerequisite,

    #[error("course not found")]
    NotFound,

    #[error(transparent)]
    Db(#[from] DbErr),
}

#[derive(Debug, Error)]
pub enum GradeError {
    #[error("total points must be positive, got {total}")]
    InvalidTotalPoints { total: f64 },

    #[error("score {points} is outside 0..={total}")]
    ScoreOutOfRange { points: f64, total: f64 },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Db(#[from] DbErr),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username is already taken")]
    UsernameTaken,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("session has expired")]
    SessionExpired,

    #[error("invalid session token")]
    InvalidSession,

    #[error("user not found")]
    NotFound,

    #[error(transparent)]
    Db(#[from] DbErr),
}

#[derive(Debug, Error)]
pub enum FacilityError {
    #[error("reservation window ends before it starts")]
    WindowInverted,

    #[error("room is already reserved for an overlapping window")]
    RoomConflict,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Db(#[from] DbErr),
}
