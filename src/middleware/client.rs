//! Gates for client applications.
//!
//! These gates verify a locally issued access token instead of asking the
//! identity service. They attach no claims: routes behind them authenticate
//! an application, not a user, and cannot be role-gated.

use axum::{
    extract::{Query, Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use tracing::instrument;

use courseware_auth::{AccessToken, parse_access_token};
use courseware_config::OAuthConfig;
use courseware_core::AppError;

use crate::modules::sessions::SessionService;
use crate::state::AppState;

/// Query-string form of a credential: `?token=<token>&token_type=Bearer`.
#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
    pub token_type: Option<String>,
}

impl TokenQuery {
    pub fn credential(&self) -> Option<String> {
        match (&self.token_type, &self.token) {
            (Some(token_type), Some(token)) => Some(format!("{} {}", token_type, token)),
            _ => None,
        }
    }
}

/// Parses the credential and checks that it has not expired.
pub fn verify_access_token(
    credential: &str,
    oauth_config: &OAuthConfig,
) -> Result<AccessToken, AppError> {
    let token = parse_access_token(credential, oauth_config)?;

    if !token.verify_expire_in() {
        return Err(AppError::unauthorized("Access token expired"));
    }

    Ok(token)
}

fn authorization_credential(req: &Request) -> Result<String, AppError> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))
}

/// `ClientCredential` gate.
#[instrument(skip_all)]
pub async fn client_credential(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let credential = authorization_credential(&req)?;
    let token = verify_access_token(&credential, &state.oauth_config)?;

    tracing::debug!(client_id = %token.client_id(), "Client credential accepted");

    Ok(next.run(req).await)
}

/// `ClientCredential` gate reading the token from the query string, for
/// callers that cannot set headers (download links, webhooks).
#[instrument(skip_all)]
pub async fn client_credential_query(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let credential = query
        .credential()
        .ok_or_else(|| AppError::unauthorized("Missing access token"))?;
    let token = verify_access_token(&credential, &state.oauth_config)?;

    tracing::debug!(client_id = %token.client_id(), "Client credential accepted");

    Ok(next.run(req).await)
}

/// `Password` gate: a client credential issued for a user whose session is
/// still live.
#[instrument(skip_all)]
pub async fn password(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let credential = authorization_credential(&req)?;
    let token = verify_access_token(&credential, &state.oauth_config)?;

    if token.user_id.is_none() || !SessionService::is_session_live(&state.db, token.sid).await? {
        return Err(AppError::unauthorized("User is not logged in"));
    }

    Ok(next.run(req).await)
}
