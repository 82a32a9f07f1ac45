//! Jom Sihat: a bilingual wellness site.
//!
//! This is the application entry point. It loads configuration from a TOML
//! file, initializes tracing, loads the translation table, sets up the Axum
//! router with all routes, and starts the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jom_sihat::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER, LOG_FORMAT_JSON};
use jom_sihat::i18n::TranslationStore;
use jom_sihat::routes::create_router;
use jom_sihat::shutdown;
use jom_sihat::state::AppState;
use jom_sihat::templates::init_templates;

/// Jom Sihat: a bilingual wellness site
#[derive(Parser, Debug)]
#[command(name = "jom-sihat", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "jom_sihat=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let config = AppConfig::load(&args.config)?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.format == LOG_FORMAT_JSON {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Loaded configuration");

    // Load translations, falling back to built-in defaults if unavailable
    let translations = Arc::new(TranslationStore::load(&config.i18n.translations_path));
    tracing::info!(
        path = %config.i18n.translations_path,
        languages = ?translations.language_codes(),
        "Loaded translations"
    );

    // Initialize Tera templates
    let tera = init_templates(Arc::clone(&translations))?;
    tracing::info!("Initialized templates");

    // Reload translations on SIGHUP without restarting
    shutdown::setup_reload_handler(Arc::clone(&translations));

    // Create application state
    let state = AppState::new(config.clone(), tera, translations);

    // Create router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.http.host, config.http.port)
        .parse()
        .expect("Invalid http.host or http.port in config");
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await?;

    Ok(())
}
