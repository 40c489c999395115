use crate::routes::{announcement, auth, course, enrollment, facility, gradebook, health, root, user};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        auth::register,
        auth::login,
        auth::logout,
        auth::me,
        user::create_user,
        course::get_courses,
        course::get_course_by_id,
        course::create_course,
        course::update_course,
        course::set_prerequisites,
        course::get_roster,
        enrollment::create_enrollment,
        enrollment::drop_enrollment,
        enrollment::list_enrollments,
        enrollment::finalize_enrollment,
        gradebook::create_assessment,
        gradebook::list_assessments,
        gradebook::record_score,
        gradebook::course_grade,
        gradebook::transcript,
        announcement::post_announcement,
        announcement::list_announcements,
        facility::list_rooms,
        facility::create_room,
        facility::update_room,
        facility::list_equipment,
        facility::create_equipment,
        facility::update_equipment,
        facility::create_reservation,
        facility::list_room_reservations,
        facility::cancel_reservation
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Authentication related endpoints"),
        (name = "Users", description = "Account administration"),
        (name = "Courses", description = "Course catalog endpoints"),
        (name = "Enrollments", description = "Enrollment admission control"),
        (name = "Gradebook", description = "Assessments, scores and transcripts"),
        (name = "Announcements", description = "Campus and course announcements"),
        (name = "Facilities", description = "Rooms, equipment and reservations"),
    ),
    info(
        title = "Registrar API",
        version = "1.0.0",
        description = "University registrar backend",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
