pub mod courses;
pub mod sessions;

pub use self::courses::model::{Course, CourseResponse};
pub use self::sessions::model::OAuthSession;
