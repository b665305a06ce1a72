use sqlx::PgPool;

use courseware_auth::IdentityClient;
use courseware_config::{IdentityConfig, OAuthConfig, ServerConfig};
use courseware_db::init_db_pool;

/// Shared, read-only per-process state. Every field is cheap to clone.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub identity: IdentityClient,
    pub oauth_config: OAuthConfig,
    pub server_config: ServerConfig,
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let identity_config = IdentityConfig::from_env();
    tracing::info!(
        validate_url = %identity_config.validate_url,
        request_timeout_ms = identity_config.request_timeout_ms,
        "Identity service configured"
    );

    Ok(AppState {
        db: init_db_pool().await,
        identity: IdentityClient::new(&identity_config)?,
        oauth_config: OAuthConfig::from_env(),
        server_config: ServerConfig::from_env(),
    })
}
