use clap::Parser;
use tracing_subscriber::EnvFilter;

use storefront_api::config::AppConfig;
use storefront_api::{app, database, AppState};

#[derive(Parser)]
#[command(name = "storefront-api")]
#[command(about = "Storefront HTTP API")]
#[command(version)]
struct Args {
    #[arg(long, env = "HOST", help = "Address to bind")]
    host: Option<String>,

    #[arg(long, env = "PORT", help = "Port to listen on")]
    port: Option<u16>,

    #[arg(long, env = "DATABASE_URL", help = "Postgres URL; omit for the in-memory store")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("storefront_api=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(url) = args.database_url.filter(|u| !u.trim().is_empty()) {
        config.database.url = Some(url);
    }
    tracing::info!("Starting Storefront API in {:?} mode", config.environment);

    let store = database::connect(&config.database).await?;

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Storefront API listening on http://{}", bind_addr);

    axum::serve(listener, app(AppState::new(store, config))).await?;
    Ok(())
}
