use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use papergum::client::BackendClient;
use papergum::config::Config;
use papergum::routes::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "papergum=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path =
        std::env::var("PAPERGUM_CONFIG").unwrap_or_else(|_| "papergum.toml".to_string());
    if !std::path::Path::new(&config_path).exists() {
        info!("No config file at {}, using defaults", config_path);
    }
    let config = Config::load_or_default(&config_path)?
        .with_backend_override(std::env::var("PAPERGUM_BACKEND_URL").ok());

    let client = BackendClient::new(&config)?;
    info!("Using news backend at {}", client.base_url());

    // Create app state
    let state = Arc::new(AppState {
        client,
        image_domains: config.image_domains.clone(),
    });

    let app = routes::router(state, &config.static_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("Server starting on http://{}", config.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
