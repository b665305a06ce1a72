//! # Courseware Auth
//!
//! Credential validation for the Courseware API. Two strategies exist and the
//! call site picks one:
//!
//! - **Remote delegation** ([`identity`]): the bearer header is forwarded to
//!   an external identity service, which answers with the caller's
//!   [`Claims`].
//! - **Local verification** ([`token`]): a signed access token is parsed and
//!   checked for expiry here. Session liveness is checked by the caller
//!   against the session store.
//!
//! Nothing is cached: every request is validated from scratch.
//!
//! # Example
//!
//! ```ignore
//! use courseware_auth::{IdentityClient, parse_access_token};
//!
//! let client = IdentityClient::new(&identity_config)?;
//! let claims = client.validate("Bearer abc.def.ghi").await?;
//!
//! let token = parse_access_token("Bearer abc.def.ghi", &oauth_config)?;
//! assert!(token.verify_expire_in());
//! ```

pub mod claims;
pub mod identity;
pub mod token;

pub use claims::{Claims, ValidateAuthResponse};
pub use identity::{IdentityClient, IdentityError};
pub use token::{AccessToken, create_access_token, parse_access_token, split_credential};
