mod api;
mod config;
mod error;
mod pages;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use state::AppState;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Multilingual advocacy site web service")]
struct Args {
    /// Config file path
    #[clap(short, long, env = "SITE_CONFIG")]
    config: Option<PathBuf>,

    /// TCP port to listen on
    #[clap(short, long, env = "SITE_PORT", default_value_t = 8080)]
    port: u16,

    /// Dictionary data file
    #[clap(long, env = "SITE_DICTIONARY")]
    dictionary: Option<PathBuf>,

    /// Content fixtures served when no CMS is configured
    #[clap(long, env = "SITE_CONTENT_FIXTURES")]
    content_fixtures: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load configuration
    let mut config = config::load(args.config.as_deref()).context("loading configuration")?;

    // Initialize logging; RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Override config with command-line arguments
    if let Some(path) = args.dictionary {
        config.dictionary.data_path = Some(path);
    }
    if let Some(path) = args.content_fixtures {
        config.content_fixtures = Some(path);
    }

    tracing::info!("Starting advocacy site web service");

    let app_state = Arc::new(AppState::from_config(&config).context("building application state")?);
    let app = api::create_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
