use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::instrument;
use uuid::Uuid;

use courseware_auth::{Claims, IdentityError};
use courseware_core::AppError;

use crate::state::AppState;

/// Claims of the caller, attached to the request by [`validate_auth`].
///
/// Used as an extractor in handlers; rejects with 401 when no earlier gate
/// attached claims, so a route missing `ValidateAuth` fails closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Uuid {
        self.0.user_id
    }

    pub fn role(&self) -> &str {
        &self.0.role
    }

    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("User not authorized"))
    }
}

/// `ValidateAuth` gate: delegates the bearer credential to the identity
/// service and attaches the returned claims to the request.
#[instrument(skip_all, fields(path = %req.uri().path()))]
pub async fn validate_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let claims = state
        .identity
        .validate(authorization.as_deref())
        .await
        .map_err(IdentityError::into_app_error)?;

    req.extensions_mut().insert(AuthUser(claims));

    Ok(next.run(req).await)
}
