use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use toyhaus::{AppConfig, ToyHaus};
use toyhaus_http::create_router;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Catalog server over JSON collections
#[derive(Debug, Parser)]
#[command(name = "toyhaus", version, about)]
struct Args {
    /// Configuration file; defaults to $TOYHAUS_CONFIG or ./toyhaus.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Replace the toy collection with this many sample toys before starting
    #[arg(long, value_name = "N")]
    seed_toys: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load().context("Failed to load config")?,
    };

    if let Some(count) = args.seed_toys {
        toyhaus::seed::write_sample_toys(&config.storage.toy_path(), count).await?;
    }

    let addr = config.server.bind_address();
    let haus = ToyHaus::open(config)
        .await
        .context("Failed to load collections")?;
    let app = create_router(haus);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server is up. Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
