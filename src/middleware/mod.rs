//! Middleware for request authorization.
//!
//! Authorization is a chain of gates wrapped around a route. Each gate either
//! passes the request on, possibly after attaching the caller's claims, or
//! ends the request with a classified rejection.
//!
//! # Modules
//!
//! - [`auth`]: `ValidateAuth` (remote delegation) and the [`auth::AuthUser`] extractor
//! - [`role`]: `RoleCheck` / `UserRoleCheck` role gates
//! - [`client`]: `ClientCredential` / `Password` gates (local token verification)
//! - [`gate`]: The [`gate::Gate`] list and [`gate::apply_gates`]
//!
//! # Authorization Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `ValidateAuth` forwards it to the identity service and attaches `AuthUser(Claims)`
//! 3. `RoleCheck` compares the claimed role with the route's required role
//! 4. Handler executes and reads the claims through the `AuthUser` extractor
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::gate::{Gate, apply_gates};
//!
//! let router = Router::new().route("/", post(create_course));
//! let router = apply_gates(router, &state, &[Gate::ValidateAuth, Gate::RoleCheck]);
//! ```

pub mod auth;
pub mod client;
pub mod gate;
pub mod role;
