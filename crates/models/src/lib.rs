pub mod facility;
pub mod grading;
pub mod options;
pub mod role;
pub mod status;
pub mod term;
