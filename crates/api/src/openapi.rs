use crate::models::*;
use crate::routes::health::HealthResponse;
use utoipa::OpenApi;

/// OpenAPI documentation configuration
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mergington High School Activities API",
        description = "View extracurricular activities and sign up for or withdraw from them.\n\nActivity names and emails are passed percent-encoded in the path and query string.",
        version = "1.0.0",
        license(
            name = "MIT",
        )
    ),
    paths(
        // Activity endpoints
        crate::routes::activities::list_activities,
        crate::routes::activities::get_activity,
        crate::routes::activities::signup_for_activity,
        crate::routes::activities::unregister_from_activity,
        // Health
        crate::routes::health::health_check,
    ),
    components(
        schemas(
            ActivitiesResponse, ActivityResponse, MessageResponse,
            ErrorResponse, ErrorDetail, HealthResponse,
        ),
    ),
    tags(
        (name = "Activities", description = "Activity catalog and registration"),
        (name = "Health", description = "Service health")
    )
    // No servers - let client determine the URL dynamically
)]
pub struct ApiDoc;
