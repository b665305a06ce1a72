use axum::{Router, routing::post};

use crate::middleware::gate::{Gate, apply_gates};
use crate::state::AppState;

use super::controller::{create_course, get_courses};

pub fn init_courses_router(state: &AppState) -> Router<AppState> {
    let router = Router::new().route("/", post(create_course).get(get_courses));

    apply_gates(router, state, &[Gate::ValidateAuth])
}
