use color_eyre::eyre::Result;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use roster_adapters::{PostgresAccountStore, RosterSetting};
use roster_service::RosterService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");
    dotenvy::dotenv().ok();

    // Load configuration
    let config = RosterSetting::load();

    // Setup database connection pool
    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(config.postgres.url.expose_secret())
        .await?;

    // Run migrations
    sqlx::migrate!().run(&pg_pool).await?;

    let store = PostgresAccountStore::new(pg_pool);

    let listener = tokio::net::TcpListener::bind(&config.app.address).await?;
    tracing::info!("Starting roster service...");

    RosterService::new(store, config.session_config())
        .run_standalone(listener, Some(config.app.allowed_origins.clone()))
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
