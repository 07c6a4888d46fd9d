//! # casestatsd: case statistics daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`casestats.toml`, env vars)
//! - Install the `tracing` subscriber
//! - Pick the case source (open-data portal or local file) and put the
//!   TTL cache in front of it
//! - Build the dashboard service and the axum router
//! - Bind to a TCP port and serve until SIGINT/SIGTERM
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use casestats_adapter_http_axum::router;
use casestats_adapter_http_axum::state::AppState;
use casestats_adapter_open_data::{FileCaseSource, SodaCaseSource};
use casestats_app::cache::CachedCaseSource;
use casestats_app::ports::CaseSource;
use casestats_app::services::dashboard_service::DashboardService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    if let Some(path) = &config.source.file {
        tracing::info!(path = %path.display(), "using case file");
        serve(&config, FileCaseSource::new(path)).await
    } else {
        let source = SodaCaseSource::new(&config.source)?;
        tracing::info!(url = source.url(), limit = config.source.limit, "using open-data portal");
        serve(&config, source).await
    }
}

async fn serve<S>(config: &Config, source: S) -> Result<(), Box<dyn std::error::Error>>
where
    S: CaseSource + Send + Sync + 'static,
{
    let source = CachedCaseSource::new(source, config.source.cache_ttl());
    let state = AppState::new(DashboardService::new(source));

    let static_dir = config.static_dir();
    match static_dir {
        Some(dir) => tracing::info!(dir = %dir.display(), "serving dashboard assets"),
        None => tracing::warn!(
            dir = %config.server.static_dir.display(),
            "dashboard assets not found, serving API only"
        ),
    }
    let app = router::build(state, static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "casestatsd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("casestatsd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
