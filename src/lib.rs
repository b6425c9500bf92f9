//! Site Backend - content-block CMS: admin API and server-rendered pages

pub mod blocks;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod routes;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, patch, put},
    Router,
};
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

use crate::config::SITE_CONFIG;
use crate::routes::auth::DEFAULT_JWT_SECRET;

/// Reasons the server refuses to start or stops serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("JWT_SECRET must be set to a secure, unique value in production")]
    InsecureJwtSecret,

    #[error("invalid HOST/PORT configuration: {0}")]
    BindAddr(#[from] std::net::AddrParseError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configure CORS from environment variables.
/// Uses ALLOWED_ORIGINS (comma-separated) or FRONTEND_ORIGIN.
/// Falls back to the local admin dev server.
pub fn configure_cors() -> CorsLayer {
    let allowed_origins = std::env::var("ALLOWED_ORIGINS")
        .ok()
        .and_then(|s| {
            let origins: Vec<HeaderValue> = s
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                None
            } else {
                Some(origins)
            }
        })
        .or_else(|| {
            std::env::var("FRONTEND_ORIGIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(|origin| vec![origin])
        })
        .unwrap_or_else(|| {
            vec![
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("http://127.0.0.1:3000"),
            ]
        });

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
        .allow_credentials(true)
}

/// Create and configure the application router.
pub fn create_app() -> Router {
    let cors = configure_cors();
    tracing::info!("CORS configured");

    Router::new()
        .route("/api/block-types", get(routes::blocks::list_block_types))
        .route(
            "/api/blocks",
            get(routes::blocks::list_blocks).post(routes::blocks::create_block),
        )
        .route("/api/blocks/reorder", put(routes::blocks::reorder_blocks))
        .route(
            "/api/blocks/{id}",
            get(routes::blocks::get_block)
                .patch(routes::blocks::update_block)
                .delete(routes::blocks::delete_block),
        )
        .route(
            "/api/blocks/{id}/visibility",
            patch(routes::blocks::set_visibility),
        )
        .route("/api/blocks/{id}/plan", get(routes::blocks::get_block_plan))
        .route(
            "/api/pages/{page}/blocks",
            get(routes::pages::get_page_blocks_json),
        )
        .route("/health", get(routes::health::health_ping))
        .route("/health/detailed", get(routes::health::health_detailed))
        .route("/health/database", get(routes::health::health_database))
        .route("/health/ready", get(routes::health::health_ready))
        .route("/", get(routes::pages::home_page))
        .route("/{page}", get(routes::pages::show_page))
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        // Compress responses with gzip/br/zstd automatically
        .layer(CompressionLayer::new())
        // Block bodies are small JSON documents
        .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024))
        .layer(cors)
}

/// Production must not run with the built-in signing key.
fn check_jwt_secret(is_production: bool, secret: Option<&str>) -> Result<(), StartupError> {
    if !is_production {
        return Ok(());
    }
    match secret {
        Some(s) if !s.is_empty() && s != DEFAULT_JWT_SECRET => Ok(()),
        _ => Err(StartupError::InsecureJwtSecret),
    }
}

/// Run the server (used by main).
pub async fn run() -> Result<(), StartupError> {
    dotenvy::dotenv().ok();

    // Held for the programme's lifetime so buffered log lines are flushed.
    let _log_guards = logging::init();

    routes::health::init_start_time();

    let secret = std::env::var("JWT_SECRET").ok();
    check_jwt_secret(SITE_CONFIG.is_production(), secret.as_deref())?;

    if std::env::var("DATABASE_URL").is_ok() {
        match db::init_pool(None).await {
            Ok(pool) => {
                if let Err(e) = db::run_migrations(&pool).await {
                    tracing::error!("Failed to run database migrations: {}", e);
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to initialize database pool: {}. Continuing without database.",
                    e
                );
            }
        }
    } else {
        tracing::info!("DATABASE_URL not set. Running without database connection.");
    }

    let app = create_app();

    let addr = SITE_CONFIG.bind_addr()?;
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
