//! `poly-relayer` entry point.

use anyhow::{Context, Result};
use clap::Parser;
use relayer_runtime::cli::{self, Cli, Command};
use relayer_runtime::{RelayerConfig, RelayerRuntime, ServiceContainer};
use relayer_telemetry::{init_telemetry, TelemetryConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if let Some(level) = &args.log_level {
        telemetry = telemetry.with_log_level(level.as_str());
    }
    let _telemetry = init_telemetry(telemetry).context("Failed to initialize telemetry")?;

    let mut config =
        RelayerConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Command::Serve(serve) = &args.command {
        serve.apply(&mut config);
    }
    config.validate().context("Invalid configuration")?;

    let container = ServiceContainer::connect(config).await?;

    match &args.command {
        Command::Serve(_) => {
            let runtime = RelayerRuntime::new(container);
            runtime.start().await?;

            info!("Relayer is running. Press Ctrl+C to stop.");
            tokio::signal::ctrl_c().await?;

            runtime.shutdown().await;
        }
        command => {
            let output = cli::execute(&container, command).await?;
            println!("{}", output);
        }
    }

    Ok(())
}
