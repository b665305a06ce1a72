//! # Courseware Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`identity`]: Remote identity service used to validate bearer tokens
//! - [`oauth`]: Locally verified OAuth-style access tokens
//! - [`server`]: Listener address and CORS origins
//!
//! # Example
//!
//! ```ignore
//! use courseware_config::{IdentityConfig, OAuthConfig, ServerConfig};
//!
//! let identity_config = IdentityConfig::from_env();
//! let oauth_config = OAuthConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod identity;
pub mod oauth;
pub mod server;

pub use identity::IdentityConfig;
pub use oauth::OAuthConfig;
pub use server::ServerConfig;

pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
