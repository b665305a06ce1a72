use sqlx::{PgPool, postgres::PgExecutor};
use tracing::instrument;
use uuid::Uuid;

use courseware_core::AppError;

use super::model::{Course, CourseQueryParameters};
use super::query::{
    QueryArg, QueryError, SelectQuery, SortSpec, build_select_courses, is_sortable_column,
    resolve_sort_column, validate_and_correct_order,
};

pub struct CourseRepository;

impl CourseRepository {
    /// Column names of the `courses` table, read from the catalog on every call.
    #[instrument(skip(db))]
    pub async fn schema_columns(db: &PgPool) -> Result<Vec<String>, AppError> {
        sqlx::query_scalar::<_, String>(
            r#"SELECT column_name::text FROM information_schema.columns
               WHERE table_schema = current_schema() AND table_name = 'courses'"#,
        )
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    pub async fn exists_by_id<'e, E>(executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await
            .map_err(AppError::database)
    }

    /// Inserts `course` unless a course with the same id exists.
    #[instrument(skip(db, course), fields(course_id = %course.id))]
    pub async fn create_course(db: &PgPool, course: &Course) -> Result<Course, AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        if Self::exists_by_id(&mut *tx, course.id).await? {
            tx.rollback().await.map_err(AppError::database)?;
            return Err(AppError::conflict(anyhow::anyhow!("course already exists")));
        }

        let created = sqlx::query_as::<_, Course>(
            r#"INSERT INTO courses (id, user_id, title, content, role, created_at, created_by,
                                    updated_at, updated_by, deleted_at, deleted_by)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
               RETURNING id, user_id, title, content, role, created_at, created_by,
                         updated_at, updated_by, deleted_at, deleted_by"#,
        )
        .bind(course.id)
        .bind(course.user_id)
        .bind(&course.title)
        .bind(&course.content)
        .bind(&course.role)
        .bind(course.created_at)
        .bind(course.created_by)
        .bind(course.updated_at)
        .bind(course.updated_by)
        .bind(course.deleted_at)
        .bind(course.deleted_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow::anyhow!("course already exists"));
            }
            AppError::database(e)
        })?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(created)
    }

    /// Lists courses for validated, normalized parameters.
    ///
    /// Order and sort column are checked before any statement is sent; the
    /// column is then checked against the live schema.
    #[instrument(skip(db))]
    pub async fn resolve_courses(
        db: &PgPool,
        params: &CourseQueryParameters,
    ) -> Result<Vec<Course>, AppError> {
        let has_sort = !params.sort.is_empty();
        let order = validate_and_correct_order(&params.order, has_sort)
            .map_err(QueryError::into_app_error)?;

        let sort = if has_sort {
            if !is_sortable_column(&params.sort) {
                return Err(QueryError::InvalidSortColumn(params.sort.clone()).into_app_error());
            }
            let schema_columns = Self::schema_columns(db).await?;
            let column = resolve_sort_column(&params.sort, &schema_columns)
                .map_err(QueryError::into_app_error)?;
            order.map(|order| SortSpec { column, order })
        } else {
            None
        };

        let SelectQuery { sql, args } =
            build_select_courses(&params.role, sort, params.page, params.limit);
        tracing::debug!(sql = %sql, "Listing courses");

        let mut query = sqlx::query_as::<_, Course>(&sql);
        for arg in args {
            query = match arg {
                QueryArg::Text(value) => query.bind(value),
                QueryArg::Int(value) => query.bind(value),
            };
        }

        query.fetch_all(db).await.map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::not_found(anyhow::anyhow!("courses not found")),
            e => AppError::database(e),
        })
    }
}
