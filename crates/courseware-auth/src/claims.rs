//! Identity claims issued by the identity service.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Verified identity attributes of the caller.
///
/// Produced once per request by the credential validator and read by every
/// later stage. `user_id` becomes the owner of anything the caller creates;
/// `role` scopes what the caller can list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub user_id: Uuid,
    pub username: String,
    pub role: String,
    /// Expiration timestamp (Unix seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Issued-at timestamp (Unix seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    /// Claims without an `exp` never expire on our side; the identity service
    /// already vouched for them.
    pub fn is_expired_at(&self, now: i64) -> bool {
        matches!(self.exp, Some(exp) if exp <= now)
    }
}

/// Envelope returned by the identity service's validation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateAuthResponse {
    pub data: Claims,
}
