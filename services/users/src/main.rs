use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use users::config::{AppConfig, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    // Initialize logging
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("users=info,tower_http=info"));
    match config.logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .try_init(),
    }
    .map_err(|e| anyhow::anyhow!("setting default subscriber failed: {}", e))?;

    info!("Starting user service");

    let app_state = users::build_state(&config).await?;
    info!("User service initialized successfully");

    // Start the web server
    let app = users::routes::create_router(app_state);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("User service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
