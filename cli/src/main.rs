// Copyright 2025 Recall Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use stderrlog::Timestamp;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use courier_provider::{
    fvm_shared::address::{set_current_network, Network as FvmNetwork},
    json_rpc::{JsonRpcProvider, Url},
};
use courier_sdk::{MethodRegistry, Services};

use crate::params::{handle_params, ParamsArgs};
use crate::send::{handle_send, SendArgs};

mod params;
mod send;

#[derive(Clone, Debug, Parser)]
#[command(name = "courier", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Network, determines the address prefix (f or t) used in output.
    #[arg(short, long, env = "COURIER_NETWORK", value_enum, default_value_t = Network::Mainnet)]
    network: Network,
    /// Node JSON-RPC URL.
    #[arg(long, env = "COURIER_RPC_URL", default_value = "http://127.0.0.1:1234/rpc/v1")]
    rpc_url: Url,
    /// Node API token, required for wallet and message pool methods.
    #[arg(long, env = "COURIER_RPC_TOKEN", hide_env_values = true)]
    rpc_token: Option<String>,
    /// Timeout for each call to the node.
    #[arg(long, env = "COURIER_RPC_TIMEOUT", value_parser = humantime::parse_duration, default_value = "60s")]
    rpc_timeout: Duration,
    /// TOML file mapping builtin actor names to code CIDs.
    /// If not given, the table is fetched from the node.
    #[arg(long, env = "COURIER_ACTORS")]
    actors: Option<String>,
    /// Logging verbosity (repeat for more verbose logging).
    #[arg(short, long, env = "COURIER_LOG_VERBOSITY", action = clap::ArgAction::Count)]
    verbosity: u8,
    /// Silence logging.
    #[arg(short, long, env = "COURIER_LOG_QUIET", default_value_t = false)]
    quiet: bool,
}

#[derive(Clone, Debug, Subcommand)]
enum Commands {
    /// Send funds or invoke an actor method.
    Send(SendArgs),
    /// Method params related commands.
    Params(ParamsArgs),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Network {
    /// Mainnet addresses (f-prefixed).
    Mainnet,
    /// Testnet addresses (t-prefixed).
    Testnet,
}

impl Network {
    pub fn get(&self) -> FvmNetwork {
        match self {
            Network::Mainnet => FvmNetwork::Mainnet,
            Network::Testnet => FvmNetwork::Testnet,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    stderrlog::new()
        .module(module_path!())
        .module("courier_sdk")
        .module("courier_provider")
        .quiet(cli.quiet)
        .verbosity(cli.verbosity as usize)
        .timestamp(Timestamp::Millisecond)
        .init()?;

    set_current_network(cli.network.get());

    let ctx = CancellationToken::new();
    let interrupt = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling");
            interrupt.cancel();
        }
    });

    let needs_registry = match &cli.command {
        Commands::Send(args) => args.needs_registry(),
        Commands::Params(_) => true,
    };
    let mut services = connect(&cli, &ctx, needs_registry).await?;
    let res = match &cli.command {
        Commands::Send(args) => handle_send(&services, &ctx, args).await,
        Commands::Params(args) => handle_params(&services, &ctx, args).await,
    };
    services.close()?;
    res
}

/// Opens a node session with the method registry from `--actors` or the node.
async fn connect(
    cli: &Cli,
    ctx: &CancellationToken,
    needs_registry: bool,
) -> anyhow::Result<Services<JsonRpcProvider>> {
    let provider = JsonRpcProvider::new_http(
        cli.rpc_url.clone(),
        cli.rpc_token.clone(),
        Some(cli.rpc_timeout),
    )?;
    let registry = match &cli.actors {
        _ if !needs_registry => MethodRegistry::default(),
        Some(path) => {
            let path = shellexpand::full(path)?;
            let contents = tokio::fs::read_to_string(&*path)
                .await
                .with_context(|| format!("failed to read actors file {}", path))?;
            MethodRegistry::from_toml(&contents)?
        }
        None => {
            tokio::select! {
                _ = ctx.cancelled() => anyhow::bail!("interrupted"),
                registry = fetch_registry(&provider) => registry?,
            }
        }
    };
    Ok(Services::new(provider, registry))
}

async fn fetch_registry(provider: &JsonRpcProvider) -> anyhow::Result<MethodRegistry> {
    let version = provider.network_version().await?;
    let codes = provider
        .actor_code_cids(version)
        .await
        .context("failed to fetch actor code CIDs; pass --actors to skip")?;
    Ok(MethodRegistry::from_code_cids(
        codes.iter().map(|(name, cid)| (name.as_str(), *cid)),
    ))
}

/// Print serializable to stdout as pretty formatted JSON.
fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&value)?;
    println!("{}", json);
    Ok(())
}
