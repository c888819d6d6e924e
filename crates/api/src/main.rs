use anyhow::Context;
use api::{build_app, init_domain_services};
use config::{ApiConfig, LoggingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first to get logging settings
    let config = ApiConfig::load_or_env().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Application cannot start without a valid configuration.");
        std::process::exit(1);
    });

    init_tracing(&config.logging);

    let domain_services = init_domain_services(&config.catalog).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid activity catalog");
        tracing::error!("Application cannot start without a valid catalog. Exiting.");
        std::process::exit(1);
    });

    let app = build_app(domain_services);

    let bind_address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;

    tracing::info!(address = %bind_address, "Server started successfully");
    tracing::info!("API Endpoints:");
    tracing::info!("  - GET /activities (List activities)");
    tracing::info!("  - GET /activities/{{activity_name}} (Activity details)");
    tracing::info!("  - POST /activities/{{activity_name}}/signup?email= (Sign up)");
    tracing::info!("  - DELETE /activities/{{activity_name}}/unregister?email= (Unregister)");
    tracing::info!("  - GET /health (Health check)");
    tracing::info!("  - GET /docs (API documentation)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

fn init_tracing(logging_config: &LoggingConfig) {
    let filter = logging_config.filter_directive();

    match logging_config.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        "compact" => {
            tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .init();
        }
    }
}
