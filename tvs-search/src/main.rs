//! tvs-search - Tango video search service
//!
//! Serves filter options and video pages from a read-only catalog snapshot.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tvs_common::config::{ConfigOverrides, SearchConfig};
use tvs_search::db::freshness::format_last_updated;
use tvs_search::db::CatalogStore;
use tvs_search::{build_info, build_router, AppState, QuerySettings};

/// Command-line arguments for tvs-search
#[derive(Parser, Debug)]
#[command(name = "tvs-search")]
#[command(about = "Filter-aware tango video search service")]
#[command(version)]
struct Args {
    /// Catalog database (opened read-only)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:5730
    #[arg(short, long)]
    bind: Option<String>,

    /// Videos per page
    #[arg(long)]
    page_size: Option<i64>,

    /// Default ordering: published_at or view_count
    #[arg(long)]
    sort: Option<String>,

    /// Config file (defaults to ~/.config/tango-video-search/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info", env = "TVS_LOG_LEVEL")]
    log_level: String,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_file: self.config.clone(),
            database_path: self.database.clone(),
            bind_address: self.bind.clone(),
            page_size: self.page_size,
            sort: self.sort.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification first, before any database delay
    info!("Starting tango video search (tvs-search) {}", build_info());

    let config = SearchConfig::resolve(&args.overrides()).context("Invalid configuration")?;
    info!("Database path: {}", config.database_path.display());

    let store = match CatalogStore::connect_readonly(
        &config.database_path,
        Duration::from_millis(config.busy_timeout_ms),
    )
    .await
    {
        Ok(store) => {
            info!("✓ Connected to catalog (read-only)");
            store
        }
        Err(e) => {
            error!("Failed to open catalog: {}", e);
            return Err(e.into());
        }
    };
    info!(
        "Catalog last updated: {}",
        format_last_updated(store.last_updated().await)
    );

    let state = AppState::new(store.clone(), QuerySettings::from(&config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_address))?;
    info!("tvs-search listening on http://{}", config.bind_address);
    info!("Health check: http://{}/health", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    store.close().await;
    info!("tvs-search stopped");

    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
