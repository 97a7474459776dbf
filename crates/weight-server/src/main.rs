use anyhow::Result;
use clap::Parser;
use infrastructure::ServerConfig;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use weight_server::{AppState, create_router};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding default.toml and {RUN_MODE}.toml
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// HTTP port
    #[arg(long)]
    port: Option<u16>,

    /// Database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::load(&args.config_dir)?;
    if let Some(port) = args.port {
        config.http.port = port;
    }
    if let Some(url) = args.database_url {
        config.database.url = url;
    }

    // RUST_LOG still wins over the configured filter
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("⚖️ Weight Server Starting...");

    // 1. Connect to Database
    let db = infrastructure::connect(&config.database.url, config.database.max_connections).await?;

    // 2. Run Migrations
    info!("Running database migrations...");
    Migrator::up(&db, None).await?;
    info!("✅ Migrations applied successfully");

    // 3. Start API Server
    let app = create_router(Arc::new(AppState::new(db)));
    let addr = format!("{}:{}", config.http.host, config.http.port);
    info!("🚀 API Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
