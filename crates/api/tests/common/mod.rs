#![allow(dead_code)]

use api::{build_app, init_domain_services};
use config::{ActivityConfig, CapacityPolicy, CatalogConfig};

/// Helper function to create an activity definition for tests
pub fn activity(name: &str, max_participants: u32, participants: &[&str]) -> ActivityConfig {
    ActivityConfig {
        name: name.to_string(),
        description: format!("{name} description"),
        schedule: "Fridays, 3:30 PM - 5:00 PM".to_string(),
        max_participants,
        participants: participants.iter().map(|p| p.to_string()).collect(),
    }
}

/// Unique email so tests sharing the built-in catalog never collide
pub fn unique_email() -> String {
    format!("test-{}@example.com", &uuid::Uuid::new_v4().simple().to_string()[..8])
}

/// Percent-encode a path segment or query value
pub fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

pub fn signup_path(activity: &str, email: &str) -> String {
    format!("/activities/{}/signup?email={}", encode(activity), encode(email))
}

pub fn unregister_path(activity: &str, email: &str) -> String {
    format!(
        "/activities/{}/unregister?email={}",
        encode(activity),
        encode(email)
    )
}

/// Setup a test server over the built-in catalog
pub fn setup_test_server() -> axum_test::TestServer {
    setup_test_server_with(CatalogConfig::default())
}

/// Setup a test server over an isolated catalog
pub fn setup_test_server_with(catalog: CatalogConfig) -> axum_test::TestServer {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::level_filters::LevelFilter::DEBUG)
        .try_init();

    let domain_services = init_domain_services(&catalog).expect("valid test catalog");
    let app = build_app(domain_services);
    axum_test::TestServer::new(app).unwrap()
}

/// Test server whose catalog holds only an empty Chess Club with room for 12
pub fn setup_chess_club_server() -> axum_test::TestServer {
    setup_test_server_with(CatalogConfig {
        capacity_policy: CapacityPolicy::Enforce,
        activities: vec![activity("Chess Club", 12, &[])],
    })
}

/// Current roster of one activity as reported by `GET /activities`
pub async fn participants(server: &axum_test::TestServer, activity: &str) -> Vec<String> {
    let response = server.get("/activities").await;
    assert_eq!(response.status_code(), 200);
    let api::models::ActivitiesResponse(activities) =
        response.json::<api::models::ActivitiesResponse>();
    activities
        .get(activity)
        .unwrap_or_else(|| panic!("activity '{activity}' missing from listing"))
        .participants
        .clone()
}
