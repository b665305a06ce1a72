//! OAuth session store backing locally verified access tokens.
//!
//! A session row is created whenever the CLI issues a token. Revoking or
//! logging out a session invalidates every token that names it on the next
//! request; nothing is cached.

pub mod model;
pub mod service;

pub use model::OAuthSession;
pub use service::SessionService;
