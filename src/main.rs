//! vizai-frontend: page shell for VizAI Animal Behavior Analytics.
//!
//! This is the application entry point. It initializes tracing, loads the
//! TOML configuration, resolves the frontend environment, mounts the status
//! panel (which starts the one backend check), and serves the page until a
//! shutdown signal arrives. The panel is unmounted after the server drains.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vizai_frontend::config::{
    AppConfig, FrontendEnv, LoggingConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER,
};
use vizai_frontend::http::{shutdown_signal, start_server};
use vizai_frontend::routes::create_router;
use vizai_frontend::state::AppState;
use vizai_frontend::status::{ReqwestFetcher, StatusPanel};
use vizai_frontend::templates::init_templates;

/// vizai-frontend: environment and backend status page
#[derive(Parser, Debug)]
#[command(name = "vizai-frontend", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "vizai_frontend=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

fn init_tracing(log_filter: &str, logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(log_filter);

    if logging.is_json() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Configuration first so the log format is known
    let config = AppConfig::load(&args.config)?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, &config.logging);

    tracing::info!(config = %args.config, "Loaded configuration");

    let env = FrontendEnv::from_env();
    tracing::info!(
        api_base = env.api_base.as_deref().unwrap_or("-"),
        ws_url = env.ws_url.as_deref().unwrap_or("-"),
        frontend_url = env.frontend_url.as_deref().unwrap_or("-"),
        "Resolved frontend environment"
    );

    let tera = init_templates(&config.paths)?;
    tracing::info!("Initialized templates");

    // Mount the status panel; this starts the single backend check
    let panel = StatusPanel::mount(Arc::new(env), Arc::new(ReqwestFetcher::default()));

    let state = AppState::new(config.clone(), tera, panel);
    let app = create_router(state.clone());

    start_server(app, &config.http, shutdown_signal()).await?;

    state.status.unmount();
    tracing::info!("Shutdown complete");

    Ok(())
}
