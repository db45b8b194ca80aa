use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use fyrvakt_config::{ConfigError, FyrvaktConfig};
use fyrvakt_engine::{read_status_file, run_diagnostics, run_node, RunOptions};
use fyrvakt_telemetry::{EventLogger, LogFormat, MetricsRecorder};
use tracing::{error, info};

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the aggregation node until Ctrl-C
    Run(RunArgs),
    /// Check configuration, directories and analyzers
    Diagnose(ConfigArgs),
    /// Print the status document exported by a running node
    Status(ConfigArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Configuration file; defaults to the layered `config/` lookup
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Newline-delimited JSON capture to replay instead of the generator
    #[arg(short, long)]
    pub replay: Option<PathBuf>,
    /// Stop after this many ticks
    #[arg(long)]
    pub ticks: Option<u64>,
}

impl ConfigArgs {
    fn load(&self) -> Result<FyrvaktConfig, ConfigError> {
        match &self.config {
            Some(path) => FyrvaktConfig::load_from_path(path),
            None => FyrvaktConfig::load(),
        }
    }
}

pub async fn run(args: RunArgs) -> anyhow::Result<()> {
    let config = args.config.load().context("Failed to load configuration")?;
    EventLogger::init(
        &config.node.log_level,
        LogFormat::from_name(&config.telemetry.log_format),
    );

    let metrics = MetricsRecorder::new();
    let options = RunOptions {
        replay: args.replay,
        ticks: args.ticks,
    };
    run_node(&config, options, metrics.clone(), ctrl_c())
        .await
        .context("Node failed to start")?;

    if config.telemetry.metrics_enabled {
        match metrics.gather_metrics() {
            Ok(text) => info!("Final metrics:\n{text}"),
            Err(e) => error!(error = %e, "Failed to gather metrics"),
        }
    }
    Ok(())
}

pub fn diagnose(args: ConfigArgs) -> anyhow::Result<()> {
    let collector = run_diagnostics(args.load());
    print!("{}", collector.render());
    if !collector.all_passed() {
        bail!("{} diagnostic check(s) failed", collector.failed_count());
    }
    Ok(())
}

pub async fn status(args: ConfigArgs) -> anyhow::Result<()> {
    let config = args.load().context("Failed to load configuration")?;
    let path = &config.status.path;
    match read_status_file(path).await? {
        Some(document) => {
            println!("{}", serde_json::to_string_pretty(&document)?);
            Ok(())
        }
        None => bail!(
            "Status file not found at {}. Is the node running?",
            path.display()
        ),
    }
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C"),
        Err(e) => {
            error!(error = %e, "Unable to listen for Ctrl-C, running until the source ends");
            std::future::pending::<()>().await;
        }
    }
}
