//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod overview;

use std::sync::Arc;

use axum::{
    Router, http,
    http::{Method, header},
    middleware::from_fn_with_state,
};
use outreach::{OutreachConfig, PgOutreachRepository, outreach_router};
use platform::staff::require_staff;
use registry::{PgRegistryRepository, RegistryConfig, registry_router};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ServerConfig, StaffSource};
use crate::overview::{OverviewState, overview_routes};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,registry=info,outreach=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    match &config.staff_source {
        StaffSource::Configured => {
            tracing::info!(staff_members = config.staff.len(), "Staff tokens loaded");
        }
        StaffSource::Development(token) => {
            tracing::warn!(
                token = %token,
                "STAFF_TOKENS not set, using a generated development token for staff `dev`"
            );
        }
    }

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Context configuration
    let (registry_config, outreach_config) = if cfg!(debug_assertions) {
        (RegistryConfig::development(), OutreachConfig::development())
    } else {
        (RegistryConfig::default(), OutreachConfig::default())
    };
    let registry_config = registry_config.with_organization_name(config.organization_name.clone());

    let registry_repo = PgRegistryRepository::new(pool.clone());
    let outreach_repo = PgOutreachRepository::new(pool.clone());

    let registry = registry_router(registry_repo.clone(), registry_config.clone());
    let outreach = outreach_router(outreach_repo.clone(), outreach_config.clone());
    let (overview_public, overview_staff) = overview_routes(OverviewState::new(
        registry_repo,
        outreach_repo,
        registry_config,
        outreach_config,
    ));

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let public = Router::new()
        .merge(registry.public)
        .merge(outreach.public)
        .merge(overview_public);

    let staff = Router::new()
        .merge(registry.staff)
        .merge(outreach.staff)
        .merge(overview_staff)
        .layer(from_fn_with_state(Arc::new(config.staff), require_staff));

    let app = Router::new()
        .nest("/api", public)
        .nest("/api/staff", staff)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = config.bind_addr;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
