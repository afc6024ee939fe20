// Copyright 2025 Recall Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use anyhow::anyhow;
use clap::{Args, Subcommand};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use courier_provider::{
    fvm_ipld_encoding::RawBytes,
    fvm_shared::{address::Address, MethodNum},
    util::parse_address,
    NodeClient,
};
use courier_sdk::Services;

use crate::print_json;

#[derive(Clone, Debug, Args)]
pub struct ParamsArgs {
    #[command(subcommand)]
    command: ParamsCommands,
}

#[derive(Clone, Debug, Subcommand)]
enum ParamsCommands {
    /// Encode JSON params for a method as hex encoded CBOR.
    Encode(EncodeArgs),
    /// Decode hex encoded CBOR params for a method as JSON.
    Decode(DecodeArgs),
    /// List the methods with known params on an actor.
    Methods(MethodsArgs),
}

#[derive(Clone, Debug, Args)]
struct EncodeArgs {
    /// The actor address the method belongs to.
    #[arg(value_parser = parse_address)]
    to: Address,
    /// The method number.
    method: MethodNum,
    /// The params as JSON.
    json: String,
}

#[derive(Clone, Debug, Args)]
struct DecodeArgs {
    /// The actor address the method belongs to.
    #[arg(value_parser = parse_address)]
    to: Address,
    /// The method number.
    method: MethodNum,
    /// The params as hex encoded CBOR.
    hex: String,
}

#[derive(Clone, Debug, Args)]
struct MethodsArgs {
    /// The actor address.
    #[arg(value_parser = parse_address)]
    to: Address,
}

/// Params commands handler.
pub async fn handle_params<C: NodeClient>(
    services: &Services<C>,
    ctx: &CancellationToken,
    args: &ParamsArgs,
) -> anyhow::Result<()> {
    match &args.command {
        ParamsCommands::Encode(args) => {
            let params = services
                .decode_typed_params_from_json(ctx, args.to, args.method, &args.json)
                .await?;
            println!("{}", hex::encode(params.bytes()));
            Ok(())
        }
        ParamsCommands::Decode(args) => {
            let bytes = hex::decode(args.hex.trim_start_matches("0x"))
                .map_err(|e| anyhow!("invalid hex params: {}", e))?;
            let json = services
                .decode_params_to_json(ctx, args.to, args.method, &RawBytes::new(bytes))
                .await?;
            print_json(&json)
        }
        ParamsCommands::Methods(args) => {
            let methods: Vec<_> = services
                .actor_methods(ctx, args.to)
                .await?
                .into_iter()
                .map(|(num, meta)| {
                    json!({"method": num, "name": meta.name, "params": meta.params.type_name()})
                })
                .collect();
            print_json(&methods)
        }
    }
}
