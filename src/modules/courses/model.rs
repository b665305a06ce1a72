use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use courseware_auth::Claims;
use courseware_core::AppError;

pub const DEFAULT_PAGE: i64 = 0;
pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, Validate)]
pub struct Course {
    pub id: Uuid,
    pub user_id: Uuid,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
    /// Audience role, copied from the creator's claims. Not in the listing
    /// projection, so listed rows carry an empty string.
    #[sqlx(default)]
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<Uuid>,
}

impl Course {
    /// Builds a new course owned by the caller and validates it.
    pub fn new_from_request(dto: CreateCourseDto, claims: &Claims) -> Result<Self, AppError> {
        let course = Self {
            id: Uuid::new_v4(),
            user_id: claims.user_id,
            title: dto.title,
            content: dto.content,
            role: claims.role.clone(),
            created_at: Utc::now(),
            created_by: claims.user_id,
            updated_at: None,
            updated_by: None,
            deleted_at: None,
            deleted_by: None,
        };

        course.validate().map_err(AppError::bad_request)?;

        Ok(course)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: Uuid,
    #[serde(rename = "userID")]
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_by: Option<Uuid>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            user_id: course.user_id,
            title: course.title,
            content: course.content,
            created_at: course.created_at,
            created_by: course.created_by,
            updated_at: course.updated_at,
            updated_by: course.updated_by,
            deleted_at: course.deleted_at,
            deleted_by: course.deleted_by,
        }
    }
}

/// Raw listing query string. Numbers are parsed leniently: anything that is
/// not a usable value falls back to the default instead of failing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseListParams {
    /// Zero-based page number (default 0)
    pub page: Option<String>,
    /// Page size (default 10)
    pub limit: Option<String>,
    /// Column to sort by
    pub sort: Option<String>,
    /// `asc` or `desc`
    pub order: Option<String>,
}

impl CourseListParams {
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 0)
            .unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|l| l.trim().parse::<i64>().ok())
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_LIMIT)
    }

    pub fn into_query_parameters(self, role: &str) -> CourseQueryParameters {
        CourseQueryParameters {
            page: self.page(),
            limit: self.limit(),
            sort: self.sort.unwrap_or_default(),
            order: self.order.unwrap_or_default(),
            role: role.to_string(),
        }
    }
}

/// Normalized listing request. `sort`, `order` and `role` may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseQueryParameters {
    pub page: i64,
    pub limit: i64,
    pub sort: String,
    pub order: String,
    pub role: String,
}

impl Default for CourseQueryParameters {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort: String::new(),
            order: String::new(),
            role: String::new(),
        }
    }
}
