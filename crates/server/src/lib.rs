//! # askdocs-server
//!
//! The web front end of the document assistant: a single-page chat UI plus the
//! JSON API it talks to.

pub mod config;
pub mod errors;
pub mod frontend;
pub mod handlers;
pub mod router;
pub mod state;

use crate::{
    config::{get_config, ConfigError},
    router::create_router,
    state::{build_app_state, AppState},
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

/// Serves the application on an already-bound listener.
pub async fn run(listener: TcpListener, app_state: AppState) -> anyhow::Result<()> {
    let app = create_router(app_state);

    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// The library's main entry point.
///
/// Sets up logging and loads the configuration. A missing AI credential stops
/// startup here, before any document is read or any port is bound. Otherwise
/// the knowledge base is loaded once, the listener is bound and `run` takes over.
pub async fn start(config_path: Option<&str>) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match get_config(config_path) {
        Ok(config) => config,
        Err(e @ ConfigError::MissingSecret) => {
            error!("{e}");
            eprintln!("{e}");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };
    debug!(?config, "Server configuration loaded");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app_state = build_app_state(config).await?;

    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    run(listener, app_state).await
}
