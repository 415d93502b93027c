//! # tape-runner
//!
//! Main entry point for the trade tape recorder.
//!
//! Loads an optional JSON configuration file, reads the feed credential from
//! the environment, starts the single feed-to-sink pipeline, and keeps it
//! running until Ctrl+C.
//!
//! # Usage
//!
//! ```bash
//! FINNHUB_API_TOKEN=... tape-runner [config.json] --log-level info
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tape_core::config::AppConfig;
use tape_core::error::TapeError;
use tape_feed::pipeline::TapePipeline;
use tracing::info;

/// Trade Tape Recorder — single-subscription market data logger.
#[derive(Parser)]
#[command(name = "tape-runner", about = "Trade Tape Recorder — single-subscription market data logger")]
struct Cli {
    /// Optional configuration file path (JSON). Defaults apply without one.
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Optional log directory for file output.
    #[arg(long)]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Initialize logging
    tape_core::logging::init_logging(&cli.log_level, cli.log_dir.as_deref(), "tape-runner");

    // 2. Load configuration (pure defaults when no file is given)
    let config = match &cli.config {
        Some(path) => {
            let config = tape_core::config::load_config(path)?;
            info!("config loaded from {}", path.display());
            config
        }
        None => AppConfig::default(),
    };

    // 3. Resolve the feed credential. The only fatal error: without it no
    //    connection parameters exist, so abort before any pipeline activity.
    let token_env = config.token_env().to_string();
    let token = std::env::var(&token_env)
        .map_err(|_| TapeError::Config(format!("required credential env var {token_env} is not set")))?;

    // 4. Build and start the pipeline
    let def = tape_feed::finnhub::build(&config, &token)?;
    info!(
        "starting '{}' — symbol={}, output={}",
        def.label,
        config.symbol(),
        config.output_path().display(),
    );

    let mut pipeline = TapePipeline::new(def, config.output_path(), config.sink_queue_size());
    pipeline.start();

    info!("pipeline started — press Ctrl+C to stop");

    // 5. Wait for shutdown signal, then drain gracefully
    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");

    pipeline.stop().await;

    info!("pipeline stopped — goodbye");
    Ok(())
}
