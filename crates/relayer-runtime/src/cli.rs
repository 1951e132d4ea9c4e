//! # Operator CLI
//!
//! ```text
//! poly-relayer [--config relayer.toml] [--log-level debug] serve [--host 127.0.0.1] [--port 6500]
//! poly-relayer patch --chain 0 --height 1000 --hash 0xabc --price 15 --free
//! poly-relayer get-patch --chain 0 --height 1000 --hash 0xabc
//! poly-relayer skip --chain 2 --height 55 --hash 0xsrc
//! poly-relayer unskip --chain 2 --height 55 --hash 0xsrc
//! poly-relayer check-skip --chain 2 --height 55 --hash 0xsrc
//! poly-relayer status
//! ```
//!
//! One-off commands print JSON to stdout and exit non-zero on failure.

use crate::container::{RelayerConfig, ServiceContainer};
use crate::request::OperatorRequest;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pr_01_correction_bus::{CorrectionApi, SkipApi};
use pr_02_health_sampler::RecordingSink;
use serde::Serialize;
use shared_types::ChainId;
use std::path::PathBuf;
use std::sync::Arc;

/// Poly relayer control plane
#[derive(Parser, Debug)]
#[command(name = "poly-relayer", version)]
#[command(about = "Operator corrections, skip marks and health sampling for the poly relayer")]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true, env = "RELAYER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `info,redis=warn`; overrides RELAYER_LOG_LEVEL
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP front door and the health sampler until Ctrl+C
    Serve(ServeArgs),
    /// Store gas overrides for a tx, replacing any earlier ones
    Patch(PatchArgs),
    /// Print the overrides stored for a tx
    GetPatch(TxArgs),
    /// Stop automatic relay of a tx
    Skip(TxArgs),
    /// Resume automatic relay of a tx
    Unskip(TxArgs),
    /// Print a tx with its skip mark
    CheckSkip(TxArgs),
    /// Sample every configured chain once and print the observations
    Status,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ServeArgs {
    /// Bind host, overrides config and environment
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port, overrides config and environment
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Apply the flags that were given.
    pub fn apply(&self, config: &mut RelayerConfig) {
        if let Some(host) = &self.host {
            config.http.host = host.clone();
        }
        if let Some(port) = self.port {
            config.http.port = port;
        }
    }
}

/// Coordinates of one tx.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct TxArgs {
    /// Chain selector; 0 addresses the tx by its poly coordinates
    #[arg(long, default_value_t = 0)]
    pub chain: u64,

    /// Height in the selected coordinate system
    #[arg(long, default_value_t = 0)]
    pub height: u64,

    /// Tx hash in the selected coordinate system
    #[arg(long)]
    pub hash: String,
}

impl From<&TxArgs> for OperatorRequest {
    fn from(args: &TxArgs) -> Self {
        OperatorRequest {
            chain: ChainId(args.chain),
            height: args.height,
            hash: args.hash.trim().to_string(),
            ..Default::default()
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PatchArgs {
    /// Tx coordinates
    #[command(flatten)]
    pub tx: TxArgs,

    /// Destination gas price
    #[arg(long)]
    pub price: Option<String>,

    /// Destination gas price, EIP-1559 style
    #[arg(long)]
    pub pricex: Option<String>,

    /// Destination gas limit
    #[arg(long)]
    pub limit: Option<u64>,

    /// Bypass the fee check
    #[arg(long)]
    pub free: bool,
}

impl From<&PatchArgs> for OperatorRequest {
    fn from(args: &PatchArgs) -> Self {
        OperatorRequest {
            price: args.price.clone(),
            price_x: args.pricex.clone(),
            limit: args.limit,
            free: args.free,
            ..OperatorRequest::from(&args.tx)
        }
    }
}

fn render<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to encode output")
}

/// Run a one-off command against `container` and render its output.
pub async fn execute(container: &ServiceContainer, command: &Command) -> Result<String> {
    let ctx = container.request_context();
    match command {
        Command::Serve(_) => anyhow::bail!("`serve` runs the long-lived runtime, not a one-off command"),
        Command::Patch(args) => {
            let request = OperatorRequest::from(args);
            let tx = request.to_tx();
            container
                .corrections
                .patch(&ctx, request.chain, &tx)
                .await
                .context("patch failed")?;
            render(&tx)
        }
        Command::GetPatch(args) => {
            let request = OperatorRequest::from(args);
            let record = container
                .corrections
                .get_patch(&ctx, request.chain, &request.to_tx())
                .await
                .context("get-patch failed")?;
            render(&record)
        }
        Command::Skip(args) => {
            let request = OperatorRequest::from(args);
            let mut tx = request.to_tx();
            container
                .skips
                .skip(&ctx, request.chain, &tx)
                .await
                .context("skip failed")?;
            tx.skipped = true;
            render(&tx)
        }
        Command::Unskip(args) => {
            let request = OperatorRequest::from(args);
            let tx = request.to_tx();
            container
                .skips
                .unskip(&ctx, request.chain, &tx)
                .await
                .context("unskip failed")?;
            render(&tx)
        }
        Command::CheckSkip(args) => {
            let request = OperatorRequest::from(args);
            let tx = container
                .skips
                .check(&ctx, request.chain, request.to_tx())
                .await
                .context("check-skip failed")?;
            render(&tx)
        }
        Command::Status => {
            let sink = Arc::new(RecordingSink::new());
            let snapshot = container.health_sampler(sink.clone()).sample_once().await;
            let mut lines: Vec<String> = sink.observations().iter().map(ToString::to_string).collect();
            lines.push(format!("elapsed={:?} failed_reads={}", snapshot.elapsed, snapshot.failed_reads()));
            Ok(lines.join("\n"))
        }
    }
}
