//! Native messaging host binary entry point.
//!
//! This binary is launched by the browser and communicates over
//! stdin/stdout using the native messaging protocol. All diagnostics go to
//! stderr; stdout carries nothing but response frames.

use clap::Parser;
use downstage_fileops::FileMover;
use downstage_native_messaging::{run_host, HostConfig};

/// Command line arguments for the native messaging host
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (JSON or TOML)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides the
    /// config file's log_level when given
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration before touching the subscriber so the file's
    // log_level can take effect.
    let config = if let Some(config_path) = &args.config {
        HostConfig::from_file(config_path)?
    } else {
        HostConfig::default()
    };
    config.validate()?;

    let log_level = config.resolve_log_level(args.log_level.as_deref());

    // stdout belongs to the wire protocol; logs must go to stderr.
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Downstage native messaging host starting");
    tracing::info!("Log level: {}", log_level);
    match &args.config {
        Some(path) => tracing::info!("Configuration loaded from: {}", path),
        None => tracing::info!("Using default configuration"),
    }

    let mover = FileMover::with_defaults();

    run_host(mover, config).await?;

    Ok(())
}
