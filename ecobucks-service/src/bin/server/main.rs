use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use auth::Authenticator;
use ecobucks_service::config::Config;
use ecobucks_service::domain::disposal::service::DisposalService;
use ecobucks_service::domain::station::registry::StationRegistry;
use ecobucks_service::domain::user::service::UserService;
use ecobucks_service::inbound::http::router::create_router;
use ecobucks_service::inbound::http::router::AppState;
use ecobucks_service::outbound::repositories::InMemoryDisposalRepository;
use ecobucks_service::outbound::repositories::InMemoryUserRepository;
use ecobucks_service::outbound::repositories::PostgresDisposalRepository;
use ecobucks_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ecobucks_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "ecobucks-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load().context("Failed to load configuration")?;
    let storage = if config.database.url.is_empty() {
        "memory"
    } else {
        "postgresql"
    };

    tracing::info!(
        http_port = config.server.http_port,
        storage,
        access_expiration_minutes = config.jwt.access_expiration_minutes,
        refresh_expiration_hours = config.jwt.refresh_expiration_hours,
        "Configuration loaded"
    );

    let authenticator = Arc::new(
        Authenticator::new(
            config.jwt.secret.as_bytes(),
            config.hashing,
            config.jwt.token_settings(),
        )
        .context("Failed to initialise authenticator")?,
    );
    let station_registry = Arc::new(StationRegistry::new(Duration::from_secs(
        config.stations.ttl_seconds,
    )));

    let state = if config.database.url.is_empty() {
        tracing::warn!("No database configured, using in-memory storage");

        let user_repository = Arc::new(InMemoryUserRepository::new());
        let disposal_repository = Arc::new(InMemoryDisposalRepository::new(&user_repository));

        AppState {
            user_service: Arc::new(UserService::new(user_repository, Arc::clone(&authenticator))),
            disposal_service: Arc::new(DisposalService::new(disposal_repository)),
            station_registry,
            authenticator,
        }
    } else {
        let pg_pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&config.database.url)
            .await
            .context("Failed to connect to database")?;
        tracing::info!(
            max_connections = 5,
            database = "postgresql",
            "Database connection pool created"
        );

        sqlx::migrate!("./migrations").run(&pg_pool).await?;
        tracing::info!(database = "postgresql", "Database migrations completed");

        let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
        let disposal_repository = Arc::new(PostgresDisposalRepository::new(pg_pool));

        AppState {
            user_service: Arc::new(UserService::new(user_repository, Arc::clone(&authenticator))),
            disposal_service: Arc::new(DisposalService::new(disposal_repository)),
            station_registry,
            authenticator,
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    if let Err(e) = axum::serve(http_listener, create_router(state)).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    Ok(())
}
