//! Operator commands for client access tokens.

use sqlx::PgPool;
use uuid::Uuid;

use courseware_auth::create_access_token;
use courseware_config::OAuthConfig;
use courseware_core::AppError;

use crate::modules::sessions::SessionService;

#[derive(Debug)]
pub struct IssuedToken {
    pub session_id: Uuid,
    pub access_token: String,
}

/// Opens a session for `client_id` and signs an access token bound to it.
pub async fn issue_token(
    db: &PgPool,
    oauth_config: &OAuthConfig,
    client_id: &str,
    user_id: Option<Uuid>,
) -> Result<IssuedToken, AppError> {
    let session = SessionService::create_session(db, client_id, user_id).await?;
    let access_token = create_access_token(client_id, session.id, user_id, oauth_config)?;

    Ok(IssuedToken {
        session_id: session.id,
        access_token,
    })
}

pub async fn revoke_session(db: &PgPool, session_id: Uuid) -> Result<(), AppError> {
    SessionService::revoke_session(db, session_id).await
}

pub async fn logout_session(db: &PgPool, session_id: Uuid) -> Result<(), AppError> {
    SessionService::logout_session(db, session_id).await
}
