//! catalogd - Product Catalog Server Daemon
//!
//! Serves the product submission form, accepts submissions with an optional
//! image upload, and lists stored products as JSON.
//!
//! Usage:
//!   catalogd [OPTIONS] [config.toml]
//!
//! Options:
//!   -p, --port <PORT>   Listen port (overrides config and PORT)
//!       --memory        Use the in-memory store instead of MongoDB
//!
//! Without a config file, MongoDB is reached through `MONGODB_URI`.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use catalog_api::state::UPLOAD_URL_PREFIX;
use catalog_api::{create_router, AppState, UploadStore, FORM_PAGE};
use catalog_core::{MemoryStore, ProductStore};
use catalog_mongo::{MongoConfig, MongoStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, LogFormat, StoreBackend};

/// Parsed command-line arguments
struct Args {
    /// Server config file (TOML)
    config_path: Option<String>,
    port: Option<u16>,
    memory: bool,
    /// Arguments we did not recognize, reported once logging is up
    unknown: Vec<String>,
}

fn parse_args() -> anyhow::Result<Args> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut result = Args {
        config_path: None,
        port: None,
        memory: false,
        unknown: Vec::new(),
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    result.port = Some(
                        args[i + 1]
                            .parse()
                            .with_context(|| format!("Invalid port: {}", args[i + 1]))?,
                    );
                    i += 2;
                } else {
                    anyhow::bail!("Missing argument for --port");
                }
            }
            "--memory" => {
                result.memory = true;
                i += 1;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            arg if !arg.starts_with('-') => {
                // Positional argument = config file
                result.config_path = Some(arg.to_string());
                i += 1;
            }
            _ => {
                result.unknown.push(args[i].clone());
                i += 1;
            }
        }
    }

    Ok(result)
}

fn print_help() {
    eprintln!(
        r#"catalogd - Product Catalog Server Daemon

Usage: catalogd [OPTIONS] [config.toml]

Options:
  -p, --port <PORT>   Listen port (default: 3000, or PORT)
      --memory        Use the in-memory store (products are lost on exit)
  -h, --help          Print this help message

Environment:
  PORT                Listen port
  MONGODB_URI         MongoDB connection string
  MONGODB_DATABASE    MongoDB database name (default: catalog)
  RUST_LOG            Log filter (default: catalogd=info,catalog_api=info,catalog_mongo=info)

Examples:
  # Run against a local MongoDB
  MONGODB_URI=mongodb://localhost:27017 catalogd

  # Run with config file
  catalogd config.toml

  # Demo mode without a database
  catalogd --memory --port 8080
"#
    );
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "catalogd=info,catalog_api=info,catalog_mongo=info,tower_http=info".into());

    match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let args = parse_args()?;

    // Load configuration: file, then environment (.env included), then CLI flags
    let dotenv = dotenvy::dotenv();
    let mut config = match args.config_path {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_env(|key| std::env::var(key).ok())?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.memory {
        config.store.backend = StoreBackend::Memory;
    }

    // Initialize logging
    init_tracing(config.logging.format);

    tracing::info!("Starting catalogd (Product Catalog Server)");
    for arg in &args.unknown {
        tracing::warn!("Unknown argument: {}", arg);
    }
    if let Some(ref path) = args.config_path {
        tracing::info!("Loaded config from: {}", path);
    }
    if let Ok(ref path) = dotenv {
        tracing::info!("Loaded environment from: {}", path.display());
    }

    // Persistence must be ready before any route is served
    let store = create_store(&config).await?;

    let uploads = UploadStore::new(config.upload_dir(), UPLOAD_URL_PREFIX);
    uploads.ensure_dir().await.with_context(|| {
        format!(
            "Failed to create upload directory {}",
            uploads.dir().display()
        )
    })?;

    let form_page = config.server.public_dir.join(FORM_PAGE);
    if !form_page.is_file() {
        tracing::warn!(path = %form_page.display(), "Submission form page not found");
    }

    let state = AppState::new(store, &config.server.public_dir)
        .with_upload_store(uploads)
        .with_max_upload_bytes(config.server.max_upload_bytes);

    // Create the router
    let app = create_router(state);

    // Bind to address
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.server.host))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running at http://{}", listener.local_addr()?);

    // Run the server
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Build the configured product store, failing if it cannot be reached
async fn create_store(config: &Config) -> anyhow::Result<Arc<dyn ProductStore>> {
    match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; products are lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Mongodb => {
            let uri = config.store.uri.clone().ok_or_else(|| {
                anyhow::anyhow!(
                    "MongoDB backend requires a connection string (set MONGODB_URI or [store].uri)"
                )
            })?;

            let mongo = MongoConfig::new(uri)
                .with_database(&config.store.database)
                .with_collection(&config.store.collection);

            let store = MongoStore::connect(&mongo).await.map_err(|e| {
                tracing::error!(error = %e, "Error connecting to MongoDB");
                anyhow::anyhow!("Failed to initialize product store: {}", e)
            })?;

            Ok(Arc::new(store))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
