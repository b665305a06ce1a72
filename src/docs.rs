use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use courseware_core::ErrorResponse;

use crate::modules::courses::model::{CourseResponse, CreateCourseDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
    ),
    components(schemas(CourseResponse, CreateCourseDto, ErrorResponse)),
    modifiers(&SecurityAddon),
    tags(
        (name = "Courses", description = "Course creation and listing")
    ),
    info(
        title = "Courseware API",
        version = "0.1.0",
        description = "Courses resource served to callers authenticated by an external identity service.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            )
        }
    }
}
