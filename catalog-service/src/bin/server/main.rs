use std::sync::Arc;

use auth::Authenticator;
use auth::SigningKey;
use auth::TokenCodec;
use catalog_service::config::Config;
use catalog_service::inbound::http::router::create_router;
use catalog_service::outbound::repositories::PostgresProductRepository;
use catalog_service::outbound::repositories::PostgresUserRepository;
use catalog_service::AuthenticationService;
use catalog_service::ProductService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "catalog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_expiration_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let signing_key = SigningKey::new(config.jwt.secret.as_bytes())?;
    let token_codec = TokenCodec::new(
        &signing_key,
        chrono::Duration::hours(config.jwt.expiration_hours),
    );
    let authenticator = Arc::new(Authenticator::new(token_codec));

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let product_repository = Arc::new(PostgresProductRepository::new(pg_pool));

    let auth_service = Arc::new(AuthenticationService::new(
        user_repository,
        Arc::clone(&authenticator),
    ));
    let product_service = Arc::new(ProductService::new(product_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, product_service, authenticator);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
