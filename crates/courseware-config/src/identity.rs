//! Identity service configuration.
//!
//! Bearer tokens on user-facing routes are validated by forwarding them to an
//! external identity service. Every call is bounded by a connect timeout and
//! a total request timeout; there is no retry.
//!
//! # Environment Variables
//!
//! - `IDENTITY_VALIDATE_URL`: Validation endpoint (default: `http://localhost:8080/v1/auth/validate`)
//! - `IDENTITY_CONNECT_TIMEOUT_MS`: Connect timeout in milliseconds (default: 2000)
//! - `IDENTITY_REQUEST_TIMEOUT_MS`: Whole-request timeout in milliseconds (default: 5000)

use std::env;
use std::time::Duration;

use crate::env_or;

pub const DEFAULT_VALIDATE_URL: &str = "http://localhost:8080/v1/auth/validate";

#[derive(Clone, Debug)]
pub struct IdentityConfig {
    pub validate_url: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            validate_url: DEFAULT_VALIDATE_URL.to_string(),
            connect_timeout_ms: 2000,
            request_timeout_ms: 5000,
        }
    }
}

impl IdentityConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            validate_url: env::var("IDENTITY_VALIDATE_URL").unwrap_or(defaults.validate_url),
            connect_timeout_ms: env_or("IDENTITY_CONNECT_TIMEOUT_MS", defaults.connect_timeout_ms),
            request_timeout_ms: env_or("IDENTITY_REQUEST_TIMEOUT_MS", defaults.request_timeout_ms),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
