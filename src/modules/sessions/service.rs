use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use courseware_core::AppError;

use super::model::OAuthSession;

pub struct SessionService;

impl SessionService {
    #[instrument(skip(db))]
    pub async fn create_session(
        db: &PgPool,
        client_id: &str,
        user_id: Option<Uuid>,
    ) -> Result<OAuthSession, AppError> {
        let session = sqlx::query_as::<_, OAuthSession>(
            r#"INSERT INTO oauth_sessions (id, client_id, user_id)
               VALUES ($1, $2, $3)
               RETURNING id, client_id, user_id, created_at, revoked_at, logged_out_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(client_id)
        .bind(user_id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(session)
    }

    #[instrument(skip(db))]
    pub async fn get_session(db: &PgPool, session_id: Uuid) -> Result<OAuthSession, AppError> {
        sqlx::query_as::<_, OAuthSession>(
            r#"SELECT id, client_id, user_id, created_at, revoked_at, logged_out_at
               FROM oauth_sessions WHERE id = $1"#,
        )
        .bind(session_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Session not found")))
    }

    /// Whether the session exists and was neither revoked nor logged out.
    #[instrument(skip(db))]
    pub async fn is_session_live(db: &PgPool, session_id: Uuid) -> Result<bool, AppError> {
        let live = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(
                   SELECT 1 FROM oauth_sessions
                   WHERE id = $1 AND revoked_at IS NULL AND logged_out_at IS NULL
               )"#,
        )
        .bind(session_id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(live)
    }

    #[instrument(skip(db))]
    pub async fn revoke_session(db: &PgPool, session_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE oauth_sessions SET revoked_at = NOW() WHERE id = $1 AND revoked_at IS NULL",
        )
        .bind(session_id)
        .execute(db)
        .await
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Session not found or already revoked"
            )));
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn logout_session(db: &PgPool, session_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE oauth_sessions SET logged_out_at = NOW() WHERE id = $1 AND logged_out_at IS NULL",
        )
        .bind(session_id)
        .execute(db)
        .await
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Session not found or already logged out"
            )));
        }

        Ok(())
    }
}
