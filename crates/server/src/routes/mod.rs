pub mod announcement;
pub mod auth;
pub mod course;
pub mod enrollment;
pub mod facility;
pub mod gradebook;
pub mod health;
pub mod root;
pub mod user;
