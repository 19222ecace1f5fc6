use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};

use vacpoints_adapters::dataset::{seed_if_empty, JsonDataset};
use vacpoints_adapters::persistence::sqlite::SqliteDb;
use vacpoints_ports::outbound::DatasetSource;
use vacpoints_server::app::create_router;
use vacpoints_server::config::Config;
use vacpoints_server::state::AppState;

/// Vacation club points calculator API.
#[derive(Parser, Debug)]
#[command(name = "vacpoints")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "VACPOINTS_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("failed to load config")?;
    config.logging.init();
    info!("vacpoints starting");

    let db = SqliteDb::new(&config.database.url)
        .await
        .with_context(|| format!("failed to open database {}", config.database.url))?;

    match &config.seed.path {
        Some(path) if path.exists() => {
            let payload = std::fs::read(path)
                .with_context(|| format!("failed to read seed dataset {}", path.display()))?;
            let dataset = JsonDataset::new()
                .parse(&payload)
                .with_context(|| format!("invalid seed dataset {}", path.display()))?;
            seed_if_empty(&db, &dataset).await?;
        }
        Some(path) => warn!(path = %path.display(), "seed dataset not found"),
        None => {}
    }

    let app = create_router(AppState::new(db));
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    info!("vacpoints stopped");
    Ok(())
}
