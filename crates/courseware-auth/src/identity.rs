//! Remote credential delegation.
//!
//! [`IdentityClient::validate`] forwards the caller's `Authorization` header
//! to the identity service and decodes the `{ "data": Claims }` envelope it
//! answers with. The call is bounded by the configured connect and request
//! timeouts, is never retried, and fails closed.
//!
//! # Failure classification
//!
//! | Failure | Origin | Result |
//! |---------|--------|--------|
//! | Header missing or not `Bearer` | local | 401 |
//! | Connect error, timeout, body read error | remote | 500 |
//! | Non-2xx status from the identity service | remote | 401 |
//! | Body is not a claims envelope | local | 401 |
//! | Claims already expired | local | 401 |

use chrono::Utc;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use thiserror::Error;

use courseware_config::IdentityConfig;
use courseware_core::AppError;

use crate::claims::{Claims, ValidateAuthResponse};
use crate::token::split_credential;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("missing authorization header")]
    MissingCredential,
    #[error("invalid authorization header format")]
    MalformedCredential,
    #[error("identity service unavailable: {0}")]
    Unavailable(String),
    #[error("identity service rejected the credential with status {0}")]
    Rejected(u16),
    #[error("invalid claims envelope: {0}")]
    InvalidEnvelope(String),
    #[error("claims expired")]
    Expired,
}

impl IdentityError {
    /// Maps the failure onto the HTTP error taxonomy. Only fixed messages are
    /// exposed; the underlying detail goes to the logs.
    pub fn into_app_error(self) -> AppError {
        match self {
            IdentityError::MissingCredential => {
                AppError::unauthorized("Missing authorization header")
            }
            IdentityError::MalformedCredential => {
                AppError::unauthorized("Invalid authorization header format")
            }
            IdentityError::Unavailable(_) => AppError::internal(self),
            IdentityError::Rejected(_)
            | IdentityError::InvalidEnvelope(_)
            | IdentityError::Expired => {
                tracing::warn!(error = %self, "Credential rejected");
                AppError::unauthorized("Invalid or expired token")
            }
        }
    }
}

/// Client for the identity service's validation endpoint.
///
/// Cloning is cheap; the inner [`reqwest::Client`] shares its connection pool.
#[derive(Clone, Debug)]
pub struct IdentityClient {
    validate_url: String,
    client: Client,
}

impl IdentityClient {
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        Ok(Self {
            validate_url: config.validate_url.clone(),
            client,
        })
    }

    /// Validates the raw `Authorization` header value.
    ///
    /// Surrounding whitespace is trimmed; the remaining value is forwarded
    /// unchanged.
    pub async fn validate(&self, authorization: Option<&str>) -> Result<Claims, IdentityError> {
        let authorization = authorization
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(IdentityError::MissingCredential)?;

        split_credential(authorization).ok_or(IdentityError::MalformedCredential)?;

        let response = self
            .client
            .get(&self.validate_url)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IdentityError::Rejected(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        let envelope: ValidateAuthResponse = serde_json::from_slice(&body)
            .map_err(|e| IdentityError::InvalidEnvelope(e.to_string()))?;

        if envelope.data.is_expired_at(Utc::now().timestamp()) {
            return Err(IdentityError::Expired);
        }

        tracing::debug!(
            user_id = %envelope.data.user_id,
            role = %envelope.data.role,
            "Credential accepted by identity service"
        );

        Ok(envelope.data)
    }
}
