use clap::Parser;
use tracing_subscriber::EnvFilter;
use wilayah_server::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();
    tracing::info!(?config, "starting wilayah-server");

    wilayah_server::run(config).await
}
