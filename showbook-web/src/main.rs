//! showbook-web - venue/artist/show booking directory server

use anyhow::Result;
use clap::Parser;
use showbook_common::config::{self, ConfigOverrides};
use showbook_common::db::init_database;
use showbook_web::{build_router, AppState};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line arguments; each flag can also come from its env var
#[derive(Debug, Parser)]
#[command(name = "showbook-web", version, about = "Venue and artist booking directory")]
struct Args {
    /// TOML config file (default: <config dir>/showbook/config.toml)
    #[arg(long, env = "SHOWBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(long, env = "SHOWBOOK_DATABASE")]
    database: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:5000
    #[arg(long, env = "SHOWBOOK_BIND")]
    bind: Option<String>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "SHOWBOOK_LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let explicit_config = args.config.clone();

    let config = config::resolve(ConfigOverrides {
        config_file: args.config,
        database_path: args.database,
        bind_address: args.bind,
        log_level: args.log_level,
    })?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_LEVEL));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Build identification first, before any database delay
    info!(
        "Starting Showbook (showbook-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match (&config.config_file, &explicit_config) {
        (Some(path), _) => info!("Loaded config file {}", path.display()),
        (None, Some(path)) => warn!("Config file {} not found, using defaults", path.display()),
        (None, None) => info!("No config file found, using defaults"),
    }
    info!("Database path: {}", config.database_path.display());

    let pool = match init_database(&config.database_path).await {
        Ok(pool) => {
            info!("✓ Database ready");
            pool
        }
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    let app = build_router(AppState::new(pool));

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("showbook-web listening on http://{}", config.bind_address);
    info!("Health check: http://{}/health", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
