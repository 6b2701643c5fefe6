//! cpuinfo-collector Binary Entry Point
//!
//! Loads configuration, opens the database, collects one CPU snapshot and saves it.
//! Core functionality is provided by the `cpuinfo_collector` library crate.

use clap::Parser;
use cpuinfo_collector::{
    AppConfig, CpuCollector, WriteMode, config::DEFAULT_CONFIG_PATH, pipeline,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// cpuinfo-collector - Host CPU Snapshot
#[derive(Parser, Debug)]
#[command(name = "cpuinfo-collector", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, env = "CPUINFO_CONFIG")]
    config: String,

    /// Write strategy: structured or raw-statement (overrides config file)
    #[arg(short, long, env = "CPUINFO_STRATEGY")]
    strategy: Option<WriteMode>,

    /// Database host (overrides config file)
    #[arg(long, env = "CPUINFO_DB_HOST")]
    db_host: Option<String>,

    /// Database port (overrides config file)
    #[arg(long, env = "CPUINFO_DB_PORT")]
    db_port: Option<u16>,

    /// Create the cpu_info table if it does not exist
    #[arg(long)]
    init_schema: bool,

    /// Collect and print the snapshot as JSON without touching the database
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cpuinfo_collector=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    tracing::info!("Loading configuration from: {}", cli.config);
    let mut config = AppConfig::load(&cli.config)?;

    // Apply CLI/env overrides (CLI > ENV > config file)
    if let Some(host) = cli.db_host {
        config.database.host = host;
    }
    if let Some(port) = cli.db_port {
        config.database.port = port;
    }
    if cli.init_schema {
        config.database.init_schema = true;
    }
    let mode = cli.strategy.unwrap_or(config.strategy);
    config.validate()?;

    let collector = config.collector.build_collector();

    if cli.dry_run {
        let info = collector.collect()?;
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    tracing::info!("Database: {} ({})", config.database, config.database.driver);

    pipeline::run(config.database.storage_builder(), &collector, mode).await?;

    tracing::info!(strategy = %mode, "CPU static info saved");
    Ok(())
}
