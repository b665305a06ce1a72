use sqlx::PgPool;
use tracing::instrument;

use courseware_auth::Claims;
use courseware_core::AppError;

use super::model::{Course, CourseQueryParameters, CreateCourseDto};
use super::repository::CourseRepository;

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db, dto), fields(user_id = %claims.user_id))]
    pub async fn create_course(
        db: &PgPool,
        dto: CreateCourseDto,
        claims: &Claims,
    ) -> Result<Course, AppError> {
        let course = Course::new_from_request(dto, claims)?;
        let created = CourseRepository::create_course(db, &course).await?;

        tracing::info!(course_id = %created.id, "Course created");
        Ok(created)
    }

    #[instrument(skip(db))]
    pub async fn resolve_courses(
        db: &PgPool,
        params: CourseQueryParameters,
    ) -> Result<Vec<Course>, AppError> {
        CourseRepository::resolve_courses(db, &params).await
    }
}
