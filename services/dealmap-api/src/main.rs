//! Solar Deal Map Server
//!
//! Relays the CRM deal list, serves the clustered map document and the
//! static dashboard files.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use clap::Parser;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use dealmap_api::handlers;
use dealmap_api::state::AppState;

/// Solar Deal Map Server
#[derive(Parser, Debug)]
#[command(name = "dealmap-api")]
#[command(about = "Map dashboard backend for solar project deals")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:3000", env = "DEALMAP_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Dashboard configuration file
    #[arg(short, long, default_value = "config/dealmap.yaml", env = "DEALMAP_CONFIG")]
    config: String,

    /// Directory of static dashboard files
    #[arg(long, default_value = "public", env = "DEALMAP_PUBLIC_DIR")]
    public_dir: String,
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!("Starting deal map server");

    let state = match AppState::new(&args.config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("Failed to initialize application state: {:#}", e);
            std::process::exit(1);
        }
    };

    let app = Router::new()
        // CRM relay
        .route("/api/data", get(handlers::data::data_handler))
        // Engine output
        .route("/api/map", get(handlers::map::map_handler))
        .route("/api/listing", get(handlers::map::listing_handler))
        .route("/api/cluster-icon", get(handlers::map::cluster_icon_handler))
        // Health
        .route("/health", get(handlers::health::health_handler))
        // Dashboard page, icons and boundary data
        .fallback_service(ServeDir::new(&args.public_dir))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = match args.listen.parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid listen address {}: {}", args.listen, e);
            std::process::exit(1);
        }
    };

    info!("Deal map server listening on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server failed: {}", e);
        std::process::exit(1);
    }
}
