use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use stripe_detector_mcp::{Config, ConfigOverrides, Server};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "stripe-detector-mcp",
    version,
    about = "MCP server exposing Stripe payment-detection tools"
)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base URL of the detection service
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Log output format: pretty or json
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<String>,
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    // Logs go to stderr; stdout belongs to the MCP stdio transport
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        base_url: cli.base_url,
        timeout_secs: cli.timeout_secs,
        log_level: cli.log_level,
        log_format: cli.log_format,
    };

    let config = Config::load(cli.config.as_deref(), &overrides)
        .context("failed to load configuration")?;

    init_tracing(&config);

    info!(
        "Starting {} v{} (detector at {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.detector.base_url
    );

    let server = Server::new(config);
    server.run().await.context("MCP server failed")?;

    Ok(())
}
