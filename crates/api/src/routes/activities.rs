use crate::models::{ActivitiesResponse, ActivityResponse, EmailQuery, ErrorResponse, MessageResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json as ResponseJson,
};
use services::{RegistrationError, RegistrationServiceTrait};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct ActivitiesAppState {
    pub registration_service: Arc<dyn RegistrationServiceTrait>,
}

type ApiError = (StatusCode, ResponseJson<ErrorResponse>);

/// Map registration errors to HTTP status codes and error types
pub fn map_registration_error(error: &RegistrationError) -> ApiError {
    let (status, error_type) = match error {
        RegistrationError::NotFound(_) => (StatusCode::NOT_FOUND, "activity_not_found"),
        RegistrationError::AlreadyRegistered { .. } => {
            (StatusCode::BAD_REQUEST, "already_registered")
        }
        RegistrationError::NotRegistered { .. } => (StatusCode::BAD_REQUEST, "not_registered"),
        RegistrationError::CapacityExceeded { .. } => (StatusCode::BAD_REQUEST, "activity_full"),
    };
    (
        status,
        ResponseJson(ErrorResponse::new(error.to_string(), error_type.to_string())),
    )
}

fn invalid_email(message: String) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        ResponseJson(ErrorResponse::with_param(
            message,
            "invalid_email".to_string(),
            "email".to_string(),
        )),
    )
}

/// List activities
///
/// Get every activity with its schedule, capacity and current participants.
#[utoipa::path(
    get,
    path = "/activities",
    tag = "Activities",
    responses(
        (status = 200, description = "Activities keyed by name", body = ActivitiesResponse)
    )
)]
pub async fn list_activities(
    State(app_state): State<ActivitiesAppState>,
) -> ResponseJson<ActivitiesResponse> {
    let activities = app_state.registration_service.list_activities().await;
    debug!("Listing {} activities", activities.len());
    ResponseJson(activities.into())
}

/// Get activity
///
/// Get a single activity. URL-encode activity names containing spaces or slashes.
#[utoipa::path(
    get,
    path = "/activities/{activity_name}",
    tag = "Activities",
    params(
        ("activity_name" = String, Path, description = "Activity name (URL-encoded)")
    ),
    responses(
        (status = 200, description = "Activity details", body = ActivityResponse),
        (status = 404, description = "Activity not found", body = ErrorResponse)
    )
)]
pub async fn get_activity(
    State(app_state): State<ActivitiesAppState>,
    Path(activity_name): Path<String>,
) -> Result<ResponseJson<ActivityResponse>, ApiError> {
    let activity = app_state
        .registration_service
        .get_activity(&activity_name)
        .await
        .map_err(|e| {
            debug!("Get activity failed: {}", e);
            map_registration_error(&e)
        })?;

    Ok(ResponseJson((&activity).into()))
}

/// Sign up for an activity
///
/// Register an email address on the named activity's roster.
#[utoipa::path(
    post,
    path = "/activities/{activity_name}/signup",
    tag = "Activities",
    params(
        ("activity_name" = String, Path, description = "Activity name (URL-encoded)"),
        EmailQuery
    ),
    responses(
        (status = 200, description = "Signed up", body = MessageResponse),
        (status = 400, description = "Invalid email, already signed up, or activity full", body = ErrorResponse),
        (status = 404, description = "Activity not found", body = ErrorResponse)
    )
)]
pub async fn signup_for_activity(
    State(app_state): State<ActivitiesAppState>,
    Path(activity_name): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Result<ResponseJson<MessageResponse>, ApiError> {
    let email = query.validate().map_err(invalid_email)?;
    debug!("Signup request: activity='{}', email='{}'", activity_name, email);

    app_state
        .registration_service
        .signup(&activity_name, email)
        .await
        .map_err(|e| map_registration_error(&e))?;

    Ok(ResponseJson(MessageResponse::new(format!(
        "Signed up {email} for {activity_name}"
    ))))
}

/// Unregister from an activity
///
/// Remove an email address from the named activity's roster.
#[utoipa::path(
    delete,
    path = "/activities/{activity_name}/unregister",
    tag = "Activities",
    params(
        ("activity_name" = String, Path, description = "Activity name (URL-encoded)"),
        EmailQuery
    ),
    responses(
        (status = 200, description = "Unregistered", body = MessageResponse),
        (status = 400, description = "Invalid email or not signed up", body = ErrorResponse),
        (status = 404, description = "Activity not found", body = ErrorResponse)
    )
)]
pub async fn unregister_from_activity(
    State(app_state): State<ActivitiesAppState>,
    Path(activity_name): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Result<ResponseJson<MessageResponse>, ApiError> {
    let email = query.validate().map_err(invalid_email)?;
    debug!("Unregister request: activity='{}', email='{}'", activity_name, email);

    app_state
        .registration_service
        .unregister(&activity_name, email)
        .await
        .map_err(|e| map_registration_error(&e))?;

    Ok(ResponseJson(MessageResponse::new(format!(
        "Unregistered {email} from {activity_name}"
    ))))
}
