pub mod announcement;
pub mod catalog;
pub mod enrollment;
pub mod facility;
pub mod grade;
pub mod user;
