//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use auth::{AuthAppState, PgAuthRepository, auth_router};
use axum::{
    Router,
    http::{self, Method, header},
    routing::get,
};
use catalog::{CatalogAppState, PgProductRepository, catalog_router};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use ordering::{OrderingAppState, PgOrderStore, ordering_router};
use platform::policy::StaticPolicy;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,catalog=info,ordering=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::debug!(?config, "Configuration loaded");

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_with(config.database.connect_options()?)
        .await
        .context("failed to connect to database")?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: expired refresh tokens
    // Errors here should not prevent server startup
    let auth_repo = PgAuthRepository::new(pool.clone());
    match auth_repo.cleanup_expired().await {
        Ok(deleted) => {
            tracing::info!(tokens_deleted = deleted, "Refresh token cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Refresh token cleanup failed, continuing anyway");
        }
    }

    // Authorization policy
    let policy = StaticPolicy::load(&config.rbac_policy_path).with_context(|| {
        format!(
            "failed to load RBAC policy from {}",
            config.rbac_policy_path.display()
        )
    })?;
    tracing::info!(rules = policy.len(), "RBAC policy loaded");

    let auth_state = AuthAppState::new(
        auth_repo,
        config.auth_config(),
        Arc::new(config.password_hasher()),
    );
    let gate = auth_state.access_gate(Arc::new(policy));

    let api = Router::new()
        .nest("/auth", auth_router(auth_state))
        .merge(catalog_router(
            CatalogAppState::new(PgProductRepository::new(pool.clone())),
            gate.clone(),
        ))
        .merge(ordering_router(
            OrderingAppState::new(PgOrderStore::new(pool)),
            gate,
        ));

    let app = app_router(api, &config.frontend_origins);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Wrap the API routes with `/health`, the JSON 404 fallback, tracing and CORS
fn app_router(api: Router, frontend_origins: &[String]) -> Router {
    api.route("/health", get(health))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors(frontend_origins))
}

fn cors(frontend_origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
        ]))
        .allow_credentials(true)
}

async fn health() -> &'static str {
    "OK"
}

async fn not_found() -> AppError {
    AppError::new(ErrorKind::NotFound, "Resource not found")
}
