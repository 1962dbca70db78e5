use log::{error, info};

mod config;
mod countdown;
mod cover;
mod error;
mod handlers;
mod render;
mod routes;
mod rsvp;
mod state;
mod storage;
mod store;

#[cfg(test)]
mod tests;

use config::Config;
use routes::create_router;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize env_logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Logging initialized with env_logger");
    info!("Starting Invitation Service");

    let config = Config::from_env();
    let bind_addr = config.bind_addr;

    let app = create_router(config).map_err(|e| {
        error!("Failed to load page templates: {:?}", e);
        e
    })?;

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Invitation service listening on {}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
