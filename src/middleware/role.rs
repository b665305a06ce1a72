//! Role gates.
//!
//! A role gate reads the [`AuthUser`] attached by `ValidateAuth` and compares
//! its role with the one the route requires. It must come after
//! `ValidateAuth` in the same chain; without claims it rejects.

use axum::{extract::Request, middleware::Next, response::Response};

use courseware_core::AppError;

use crate::middleware::auth::AuthUser;

pub const TEACHER_ROLE: &str = "teacher";
pub const STUDENT_ROLE: &str = "student";

/// Checks that the attached claims carry exactly `required` as their role.
pub fn check_role(auth_user: Option<&AuthUser>, required: &str) -> Result<(), AppError> {
    let auth_user = auth_user.ok_or_else(|| {
        tracing::warn!(required_role = required, "Role check ran without claims");
        AppError::unauthorized("User not authorized")
    })?;

    if !auth_user.0.has_role(required) {
        tracing::warn!(
            user_id = %auth_user.user_id(),
            role = %auth_user.role(),
            required_role = required,
            "Role mismatch"
        );
        return Err(AppError::unauthorized("User not authorized"));
    }

    Ok(())
}

/// Gate requiring `required`. The claims stay attached for later stages.
pub async fn require_role(
    req: Request,
    next: Next,
    required: &'static str,
) -> Result<Response, AppError> {
    check_role(req.extensions().get::<AuthUser>(), required)?;
    Ok(next.run(req).await)
}

/// `RoleCheck` gate: teachers only.
pub async fn role_check(req: Request, next: Next) -> Result<Response, AppError> {
    require_role(req, next, TEACHER_ROLE).await
}

/// `UserRoleCheck` gate: students only.
pub async fn user_role_check(req: Request, next: Next) -> Result<Response, AppError> {
    require_role(req, next, STUDENT_ROLE).await
}
