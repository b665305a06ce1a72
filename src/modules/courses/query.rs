//! Listing statement construction.
//!
//! Every value that reaches the store is bound as a positional argument. The
//! only text spliced into the statement is the `ORDER BY` column and
//! direction, and both are taken from the static tables in this module after
//! validation, never from the caller's input.

use thiserror::Error;

use courseware_core::AppError;

/// Projection returned by the listing.
pub const COURSE_COLUMNS: &str =
    "id, user_id, title, content, created_at, created_by, updated_at, updated_by, deleted_at, deleted_by";

/// Columns a caller may sort by. `content` and `role` exist but are not sortable.
pub const SORTABLE_COLUMNS: &[&str] = &[
    "id",
    "user_id",
    "title",
    "created_at",
    "created_by",
    "updated_at",
    "updated_by",
    "deleted_at",
    "deleted_by",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid sort parameter")]
    InvalidSortColumn(String),
    #[error("Invalid order parameter")]
    InvalidSortOrder(String),
}

impl QueryError {
    pub fn into_app_error(self) -> AppError {
        match &self {
            QueryError::InvalidSortColumn(column) => {
                tracing::warn!(sort = %column, "Rejected sort column");
            }
            QueryError::InvalidSortOrder(order) => {
                tracing::warn!(order = %order, "Rejected sort order");
            }
        }
        AppError::bad_request(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: &'static str,
    pub order: SortOrder,
}

/// Whether `column` is present in the live table schema.
pub fn column_exists(column: &str, schema_columns: &[String]) -> bool {
    schema_columns.iter().any(|c| c == column)
}

/// The allow-listed spelling of `column`, if it is sortable.
pub fn sortable_column(column: &str) -> Option<&'static str> {
    SORTABLE_COLUMNS.iter().copied().find(|c| *c == column)
}

pub fn is_sortable_column(column: &str) -> bool {
    sortable_column(column).is_some()
}

/// Canonicalizes the requested direction.
///
/// An empty `order` defaults to ascending when a sort column was given and to
/// no ordering otherwise. Any token other than `asc`/`desc` (in any case) is
/// rejected, with or without a sort column.
pub fn validate_and_correct_order(
    order: &str,
    has_sort: bool,
) -> Result<Option<SortOrder>, QueryError> {
    match order.to_lowercase().as_str() {
        "" if has_sort => Ok(Some(SortOrder::Asc)),
        "" => Ok(None),
        "asc" => Ok(Some(SortOrder::Asc)),
        "desc" => Ok(Some(SortOrder::Desc)),
        _ => Err(QueryError::InvalidSortOrder(order.to_string())),
    }
}

/// Resolves a requested sort column against the allow-list and the schema.
pub fn resolve_sort_column(
    column: &str,
    schema_columns: &[String],
) -> Result<&'static str, QueryError> {
    sortable_column(column)
        .filter(|c| column_exists(c, schema_columns))
        .ok_or_else(|| QueryError::InvalidSortColumn(column.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryArg {
    Text(String),
    Int(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub sql: String,
    pub args: Vec<QueryArg>,
}

/// Builds the listing statement. An empty `role` means no role filter.
pub fn build_select_courses(
    role: &str,
    sort: Option<SortSpec>,
    page: i64,
    limit: i64,
) -> SelectQuery {
    let mut sql = format!("SELECT {} FROM courses", COURSE_COLUMNS);
    let mut args = Vec::new();

    if !role.is_empty() {
        args.push(QueryArg::Text(role.to_string()));
        sql.push_str(&format!(" WHERE role = ${}", args.len()));
    }

    if let Some(sort) = sort {
        sql.push_str(&format!(" ORDER BY {} {}", sort.column, sort.order.as_sql()));
    }

    let offset = page.saturating_mul(limit);
    args.push(QueryArg::Int(limit));
    sql.push_str(&format!(" LIMIT ${}", args.len()));
    args.push(QueryArg::Int(offset));
    sql.push_str(&format!(" OFFSET ${}", args.len()));

    SelectQuery { sql, args }
}
