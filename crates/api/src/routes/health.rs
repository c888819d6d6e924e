use crate::routes::activities::ActivitiesAppState;
use axum::{extract::State, http::StatusCode, response::Json as ResponseJson};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Number of activities in the loaded catalog
    pub activities: usize,
}

/// Health check
///
/// Liveness probe for load balancers. Reports the size of the loaded catalog.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    ),
    tag = "Health"
)]
pub async fn health_check(
    State(app_state): State<ActivitiesAppState>,
) -> (StatusCode, ResponseJson<HealthResponse>) {
    let activities = app_state.registration_service.list_activities().await.len();
    (
        StatusCode::OK,
        ResponseJson(HealthResponse {
            status: "ok".to_string(),
            version: option_env!("CARGO_PKG_VERSION").map(str::to_string),
            activities,
        }),
    )
}
