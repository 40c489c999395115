use axum::{
    Json, Router,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub mod auth;
pub mod doc;
pub mod dtos;
pub mod errors;
pub mod routes;
pub mod state;
pub mod utils;

pub use state::AppState;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(doc::ApiDoc::openapi())
}

/// Assembles the full router over the given state. Kept separate from
/// `main` so integration tests can serve the same app in-process.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root::root))
        .route("/health", get(routes::health::health))
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/logout", post(routes::auth::logout))
        .route("/auth/me", get(routes::auth::me))
        .route("/users", post(routes::user::create_user))
        .route(
            "/courses",
            get(routes::course::get_courses).post(routes::course::create_course),
        )
        .route(
            "/courses/{id}",
            get(routes::course::get_course_by_id).put(routes::course::update_course),
        )
        .route(
            "/courses/{id}/prerequisites",
            put(routes::course::set_prerequisites),
        )
        .route("/courses/{id}/roster", get(routes::course::get_roster))
        .route(
            "/courses/{id}/assessments",
            get(routes::gradebook::list_assessments).post(routes::gradebook::create_assessment),
        )
        .route("/courses/{id}/grade", get(routes::gradebook::course_grade))
        .route(
            "/assessments/{id}/scores",
            put(routes::gradebook::record_score),
        )
        .route(
            "/students/{id}/transcript",
            get(routes::gradebook::transcript),
        )
        .route(
            "/enrollments",
            get(routes::enrollment::list_enrollments).post(routes::enrollment::create_enrollment),
        )
        .route(
            "/enrollments/{id}",
            axum::routing::delete(routes::enrollment::drop_enrollment),
        )
        .route(
            "/enrollments/{id}/finalize",
            post(routes::enrollment::finalize_enrollment),
        )
        .route(
            "/announcements",
            get(routes::announcement::list_announcements)
                .post(routes::announcement::post_announcement),
        )
        .route(
            "/rooms",
            get(routes::facility::list_rooms).post(routes::facility::create_room),
        )
        .route("/rooms/{id}", put(routes::facility::update_room))
        .route(
            "/rooms/{id}/reservations",
            get(routes::facility::list_room_reservations),
        )
        .route(
            "/equipment",
            get(routes::facility::list_equipment).post(routes::facility::create_equipment),
        )
        .route("/equipment/{id}", put(routes::facility::update_equipment))
        .route(
            "/reservations",
            post(routes::facility::create_reservation),
        )
        .route(
            "/reservations/{id}",
            axum::routing::delete(routes::facility::cancel_reservation),
        )
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(Scalar::with_url("/api-docs", doc::ApiDoc::openapi()))
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_state(state)
}
