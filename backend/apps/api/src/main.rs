//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use accounts::{AccountsConfig, PgAccountRepository, TokenCodec, account_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,accounts=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url =
        env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Signing keys for session tokens
    let private_key_path =
        env::var("TOKEN_PRIVATE_KEY_PATH").unwrap_or_else(|_| "keys/ec-private.pem".to_string());
    let public_key_path =
        env::var("TOKEN_PUBLIC_KEY_PATH").unwrap_or_else(|_| "keys/ec-public.pem".to_string());

    let mut config = if cfg!(debug_assertions) {
        AccountsConfig::development()
    } else {
        AccountsConfig::default()
    };

    if let Ok(hours) = env::var("TOKEN_EXPIRY_HOURS") {
        let hours: u64 = hours
            .parse()
            .map_err(|_| anyhow::anyhow!("TOKEN_EXPIRY_HOURS must be an integer"))?;
        config.token_expiry = std::time::Duration::from_secs(hours * 3600);
    }

    let codec = TokenCodec::from_key_files(&private_key_path, &public_key_path, config.token_expiry)
        .map_err(|e| anyhow::anyhow!("failed to load token keys: {}", e))?;

    tracing::info!("Loaded ES256 token key pair");

    let repo = PgAccountRepository::new(pool);

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/accounts", account_router(repo, codec, config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 31113));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
