//! Cache-invalidation consumer binary
//!
//! Usage:
//!   cacheflush_consumer
//!   cacheflush_consumer --config config/consumer.toml
//!   cacheflush_consumer --endpoint 10.0.0.7:5556 --log-level debug

use anyhow::{Context, Result};
use cacheflush_consumer::{run, ConsumerConfig};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::watch;
use tracing::{error, info};
use transport::TcpSubscriber;

#[derive(Parser, Debug)]
#[command(name = "cacheflush_consumer")]
#[command(about = "Subscribes to the cache-invalidation channel and prints each event")]
#[command(version)]
struct Args {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Publisher endpoint, overriding the config file
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    let mut config = match &args.config {
        Some(path) => ConsumerConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ConsumerConfig::default(),
    };
    if let Some(endpoint) = args.endpoint {
        config.subscriber.endpoint = endpoint;
    }

    info!("Starting cacheflush consumer");
    info!(endpoint = %config.subscriber.endpoint, "collecting updates from cache server");

    let mut subscriber = TcpSubscriber::connect(&config.subscriber.endpoint)
        .await
        .with_context(|| format!("connecting to {}", config.subscriber.endpoint))?
        .with_max_frame_bytes(config.subscriber.max_frame_bytes);

    subscriber
        .subscribe(config.subscriber.filter.as_bytes())
        .await
        .context("registering subscription")?;

    // Ctrl-c flips the shutdown channel; the loop checks it around each fetch.
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install ctrl-c handler");
            return;
        }
        let _ = shutdown_tx.send(true);
    });

    let mut stdout = std::io::stdout();
    let stats = run(&mut subscriber, &mut shutdown_rx, &mut stdout).await?;

    info!(
        received = stats.received,
        invalidations = stats.invalidations,
        "consumer stopped"
    );

    Ok(())
}

fn init_logging(args: &Args) {
    let log_level = match args.log_level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();
}
