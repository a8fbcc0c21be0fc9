use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use floorwatch::app::{self, AppCfg};
use floorwatch::config::Config;

#[derive(Parser, Debug)]
#[command(version, about = "Watch NFT collection floor prices and alert on Telegram")]
struct Args {
    /// Path to config file (JSON, or TOML with a .toml extension)
    #[arg(short, long, default_value = "config.json")]
    config: String,

    /// Pause between cycles in milliseconds (overrides config)
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,

    /// Log alerts instead of sending them to Telegram
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let mut config = Config::from_file(&args.config)
        .with_context(|| format!("Cannot load configuration file {}", args.config))?;

    // CLI has higher priority than the config file
    if let Some(interval_ms) = args.interval_ms {
        config.poll_interval_ms = interval_ms;
    }

    let app_cfg = AppCfg::from_config(config, args.dry_run, args.once)?;
    app::run(app_cfg).await
}
