use std::env;

use crate::env_or;

/// Settings for locally verified access tokens (client credential and
/// password grants).
#[derive(Clone, Debug)]
pub struct OAuthConfig {
    pub secret: String,
    /// Lifetime of issued access tokens, in seconds.
    pub access_token_expiry: i64,
}

impl OAuthConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("OAUTH_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            access_token_expiry: env_or("OAUTH_ACCESS_TOKEN_EXPIRY", 3600), // 1 hour
        }
    }
}
