pub mod consts;
pub mod conversions;
pub mod models;
pub mod openapi;
pub mod routes;

use crate::{
    openapi::ApiDoc,
    routes::{
        activities::{
            get_activity, list_activities, signup_for_activity, unregister_from_activity,
            ActivitiesAppState,
        },
        health::health_check,
    },
};
use axum::{
    response::Html,
    routing::{delete, get, post},
    Router,
};
use config::CatalogConfig;
use services::{CatalogError, RegistrationServiceImpl, RegistrationServiceTrait};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;

#[derive(Clone)]
pub struct DomainServices {
    pub registration_service: Arc<dyn RegistrationServiceTrait>,
}

/// Initialize domain services from the catalog configuration
pub fn init_domain_services(catalog_config: &CatalogConfig) -> Result<DomainServices, CatalogError> {
    let registration_service = RegistrationServiceImpl::from_config(catalog_config)?;

    tracing::info!(
        activities = catalog_config.activities.len(),
        capacity_policy = %registration_service.capacity_policy(),
        "Activity catalog loaded"
    );

    Ok(DomainServices {
        registration_service: Arc::new(registration_service),
    })
}

/// Build the complete application router
pub fn build_app(domain_services: DomainServices) -> Router {
    let app_state = ActivitiesAppState {
        registration_service: domain_services.registration_service,
    };

    Router::new()
        .merge(build_activity_routes(app_state.clone()))
        .merge(build_health_routes(app_state))
        .merge(build_openapi_routes())
        .layer(CorsLayer::permissive())
}

/// Build activity catalog and registration routes (public endpoints)
pub fn build_activity_routes(app_state: ActivitiesAppState) -> Router {
    Router::new()
        .route("/activities", get(list_activities))
        .route("/activities/{activity_name}", get(get_activity))
        .route(
            "/activities/{activity_name}/signup",
            post(signup_for_activity),
        )
        .route(
            "/activities/{activity_name}/unregister",
            delete(unregister_from_activity),
        )
        .with_state(app_state)
}

pub fn build_health_routes(app_state: ActivitiesAppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(app_state)
}

/// Build OpenAPI documentation routes
pub fn build_openapi_routes() -> Router {
    Router::new().route("/docs", get(swagger_ui_handler)).route(
        "/api-docs/openapi.json",
        get(|| async { axum::Json(ApiDoc::openapi()) }),
    )
}

/// Serve Swagger UI HTML page
async fn swagger_ui_handler() -> Html<String> {
    Html(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Mergington High School Activities API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5.10.5/swagger-ui.css" />
    <style>
        body {
            margin: 0;
            background: #fafafa;
        }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5.10.5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5.10.5/swagger-ui-standalone-preset.js"></script>
    <script>
    window.onload = function() {
        const baseUrl = `${window.location.protocol}//${window.location.host}`;

        fetch('/api-docs/openapi.json')
            .then(response => response.json())
            .then(spec => {
                spec.servers = [{ url: baseUrl, description: 'Current Server' }];
                SwaggerUIBundle({
                    spec: spec,
                    dom_id: '#swagger-ui',
                    deepLinking: true,
                    presets: [SwaggerUIBundle.presets.apis, SwaggerUIStandalonePreset],
                    layout: "StandaloneLayout",
                    docExpansion: 'list'
                });
            })
            .catch(error => {
                console.error('Failed to load OpenAPI spec:', error);
                SwaggerUIBundle({
                    url: '/api-docs/openapi.json',
                    dom_id: '#swagger-ui',
                    presets: [SwaggerUIBundle.presets.apis, SwaggerUIStandalonePreset],
                    layout: "StandaloneLayout"
                });
            });
    };
    </script>
</body>
</html>"#.to_string())
}
