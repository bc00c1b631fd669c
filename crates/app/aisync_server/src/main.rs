//! AI integration sync server binary.
//!
//! Serves the integration HTTP API and runs the entity-changed event worker.

use std::time::Duration;

use aisync_api::config::ApiConfig;
use aisync_core::IntegrationConfig;
use aisync_core::events::{self, DEFAULT_EVENT_CAPACITY, EventWorker};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// CLI arguments for the server.
#[derive(Parser, Debug)]
#[command(name = "aisync_server", about = "AI integration sync server")]
struct Args {
    /// Address to bind the HTTP listener.
    #[arg(long, env = "BIND_ADDR", default_value = aisync_api::config::DEFAULT_BIND_ADDR)]
    bind_addr: String,

    /// PostgreSQL connection URL for tenant settings.
    #[arg(long, env = "DATABASE_URL", default_value = aisync_api::config::DEFAULT_DATABASE_URL)]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Capacity of the entity-changed event queue.
    #[arg(long, default_value_t = DEFAULT_EVENT_CAPACITY)]
    event_capacity: usize,
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,aisync_api=debug,aisync_core=debug"))?,
        )
        .init();

    let args = Args::parse();
    let integration = IntegrationConfig::from_env();

    info!(
        bind_addr = %args.bind_addr,
        max_connections = args.max_connections,
        integration_enabled = integration.is_enabled(),
        provider = %integration.provider,
        "starting aisync_server"
    );

    // Lazy: requests fall back to default credentials while the store is down.
    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect_lazy(&args.database_url)?;

    let config = ApiConfig {
        bind_addr: args.bind_addr,
        database_url: args.database_url,
        integration,
    };

    let (publisher, rx) = events::channel(args.event_capacity);
    let state = aisync_api::AppState::with_pool(config.clone(), pool, publisher)?;

    let worker = tokio::spawn(EventWorker::new(state.ai.clone(), state.resolver.clone(), rx).run());

    let app = aisync_api::router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned the last publisher; the worker drains and exits.
    let _ = worker.await;
    Ok(())
}
