//! Locally verified OAuth-style access tokens.
//!
//! Client applications authenticate with an access token minted by the
//! operator CLI. The token is an HS256-signed JWT naming the client, the
//! session it belongs to and, for password grants, the user. Verification is
//! split into the same steps the gates run:
//!
//! 1. [`parse_access_token`]: credential format, signature and structure
//! 2. [`AccessToken::verify_expire_in`]: expiry
//! 3. session liveness, checked by the caller against `oauth_sessions`
//!
//! # Example
//!
//! ```ignore
//! let raw = create_access_token("mobile-app", session_id, None, &oauth_config)?;
//! let token = parse_access_token(&format!("Bearer {raw}"), &oauth_config)?;
//! assert!(token.verify_expire_in());
//! ```

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use courseware_config::OAuthConfig;
use courseware_core::AppError;

/// Claims carried by a local access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Client ID (subject claim)
    pub sub: String,
    /// Session the token was issued for
    pub sid: Uuid,
    /// Resource owner for password grants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    /// Expiration timestamp (Unix seconds)
    pub exp: i64,
    /// Issued-at timestamp (Unix seconds)
    pub iat: i64,
}

impl AccessToken {
    pub fn client_id(&self) -> &str {
        &self.sub
    }

    pub fn verify_expire_in(&self) -> bool {
        self.verify_expire_in_at(Utc::now().timestamp())
    }

    pub fn verify_expire_in_at(&self, now: i64) -> bool {
        self.exp > now
    }
}

/// Splits a `"<type> <token>"` credential. Only the `Bearer` type is
/// accepted, case-insensitively.
pub fn split_credential(credential: &str) -> Option<&str> {
    let (token_type, token) = credential.trim().split_once(' ')?;
    let token = token.trim();

    if !token_type.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

pub fn create_access_token(
    client_id: &str,
    session_id: Uuid,
    user_id: Option<Uuid>,
    oauth_config: &OAuthConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();

    let token = AccessToken {
        sub: client_id.to_string(),
        sid: session_id,
        user_id,
        exp: now + oauth_config.access_token_expiry,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &token,
        &EncodingKey::from_secret(oauth_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create access token: {}", e)))
}

/// Parses and verifies the signature of a `"Bearer <token>"` credential.
///
/// Expiry is not checked here; see
/// [`AccessToken::verify_expire_in`].
pub fn parse_access_token(
    credential: &str,
    oauth_config: &OAuthConfig,
) -> Result<AccessToken, AppError> {
    let raw = split_credential(credential)
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;

    decode::<AccessToken>(
        raw,
        &DecodingKey::from_secret(oauth_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "Access token rejected");
        AppError::unauthorized("Invalid access token")
    })
}
