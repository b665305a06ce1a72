//! Gate chain composition.
//!
//! A route's authorization is declared as an ordered slice of [`Gate`]s. The
//! first gate in the slice sees the request first; a gate that rejects stops
//! the chain and the handler never runs.

use axum::{Router, extract::Request, middleware, middleware::Next};

use crate::middleware::auth::validate_auth;
use crate::middleware::client::{client_credential, client_credential_query, password};
use crate::middleware::role::{require_role, role_check, user_role_check};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Remote credential delegation; attaches the caller's claims.
    ValidateAuth,
    /// Requires the `teacher` role. Must follow `ValidateAuth`.
    RoleCheck,
    /// Requires the `student` role. Must follow `ValidateAuth`.
    UserRoleCheck,
    /// Requires an arbitrary role. Must follow `ValidateAuth`.
    RequireRole(&'static str),
    /// Local access token from the `Authorization` header.
    ClientCredential,
    /// Local access token from `token` / `token_type` query parameters.
    ClientCredentialQuery,
    /// Local access token bound to a live user session.
    Password,
}

impl Gate {
    fn layer(self, router: Router<AppState>, state: &AppState) -> Router<AppState> {
        match self {
            Gate::ValidateAuth => {
                router.route_layer(middleware::from_fn_with_state(state.clone(), validate_auth))
            }
            Gate::RoleCheck => router.route_layer(middleware::from_fn(role_check)),
            Gate::UserRoleCheck => router.route_layer(middleware::from_fn(user_role_check)),
            Gate::RequireRole(role) => router.route_layer(middleware::from_fn(
                move |req: Request, next: Next| require_role(req, next, role),
            )),
            Gate::ClientCredential => router.route_layer(middleware::from_fn_with_state(
                state.clone(),
                client_credential,
            )),
            Gate::ClientCredentialQuery => router.route_layer(middleware::from_fn_with_state(
                state.clone(),
                client_credential_query,
            )),
            Gate::Password => {
                router.route_layer(middleware::from_fn_with_state(state.clone(), password))
            }
        }
    }
}

/// Wraps every route of `router` in `gates`, first gate outermost.
pub fn apply_gates(
    router: Router<AppState>,
    state: &AppState,
    gates: &[Gate],
) -> Router<AppState> {
    // Layers added later wrap the ones added earlier, so apply in reverse.
    gates
        .iter()
        .rev()
        .fold(router, |router, gate| gate.layer(router, state))
}
