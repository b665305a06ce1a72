//! Courses: creation and role-filtered listing.
//!
//! `POST /courses` creates a course owned by the caller. `GET /courses` lists
//! courses whose audience role matches the caller's, with optional sorting
//! over an allow-listed set of columns and page/limit pagination.

pub mod controller;
pub mod model;
pub mod query;
pub mod repository;
pub mod router;
pub mod service;

pub use model::{Course, CourseResponse, CreateCourseDto};
pub use repository::CourseRepository;
pub use service::CourseService;
