mod auth;
mod clients;
mod config;
mod error;
mod handlers;
mod models;
mod rate_limit;
mod router;
mod state;

use config::GatewayConfig;
use router::create_router;
use state::AppState;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();

    tracing::info!("Starting restyle gateway service");

    let config = GatewayConfig::from_env()?;
    let addr = config.listen_addr;
    let state = AppState::new(config)?;

    let app = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
