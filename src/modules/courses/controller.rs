use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use tracing::instrument;

use courseware_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{CourseListParams, CourseResponse, CreateCourseDto};
use super::service::CourseService;

#[utoipa::path(
    post,
    path = "/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Malformed body or validation failure", body = courseware_core::ErrorResponse),
        (status = 401, description = "Unauthorized", body = courseware_core::ErrorResponse),
        (status = 409, description = "Course already exists", body = courseware_core::ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto), fields(user_id = %auth_user.user_id()))]
pub async fn create_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<CourseResponse>), AppError> {
    let course = CourseService::create_course(&state.db, dto, auth_user.claims()).await?;
    Ok((StatusCode::CREATED, Json(course.into())))
}

#[utoipa::path(
    get,
    path = "/courses",
    params(CourseListParams),
    responses(
        (status = 200, description = "Courses visible to the caller's role", body = Vec<CourseResponse>),
        (status = 400, description = "Invalid sort or order parameter", body = courseware_core::ErrorResponse),
        (status = 401, description = "Unauthorized", body = courseware_core::ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, params), fields(user_id = %auth_user.user_id()))]
pub async fn get_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
    params: Result<Query<CourseListParams>, QueryRejection>,
) -> Result<Json<Vec<CourseResponse>>, AppError> {
    let Query(params) = params
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;

    let courses =
        CourseService::resolve_courses(&state.db, params.into_query_parameters(auth_user.role()))
            .await?;

    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}
