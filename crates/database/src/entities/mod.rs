#[path = "announcement.rs"]
pub mod announcements;
#[path = "assessment.rs"]
pub mod assessments;
#[path = "course.rs"]
pub mod courses;
#[path = "enrollment.rs"]
pub mod enrollments;
#[path = "equipment.rs"]
pub mod equipment;
#[path = "prerequisite.rs"]
pub mod prerequisites;
#[path = "reservation.rs"]
pub mod reservations;
#[path = "room.rs"]
pub mod rooms;
#[path = "session.rs"]
pub mod sessions;
#[path = "submission.rs"]
pub mod submissions;
#[path = "user.rs"]
pub mod users;
