//! Service entry-point: resolves configuration, wires adapters, runs the
//! HTTP server.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use phishsim::server::{AppConfig, build_state, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        base_url = %config.base_url,
        database = config.database_url.is_some(),
        smtp = config.smtp.is_some(),
        "starting phishing simulation service"
    );

    let state = build_state(&config).await?;
    create_server(config, state)?.await
}
