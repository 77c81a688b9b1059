pub mod assessments;
pub mod auth;
pub mod enrollments;
pub mod health;
pub mod lecturers;
pub mod programs;
pub mod users;
