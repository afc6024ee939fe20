// Copyright 2025 Recall Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use anyhow::anyhow;
use clap::Args;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use courier_provider::{
    fvm_ipld_encoding::RawBytes,
    fvm_shared::{address::Address, econ::TokenAmount, MethodNum, METHOD_SEND},
    util::{parse_address, parse_token_amount, parse_token_amount_from_atto},
    NodeClient,
};
use courier_sdk::{Nonce, SendParams, Services};

use crate::print_json;

#[derive(Clone, Debug, Args)]
pub struct SendArgs {
    /// The recipient address.
    #[arg(value_parser = parse_address)]
    to: Address,
    /// The amount to send in FIL.
    #[arg(value_parser = parse_token_amount)]
    amount: TokenAmount,
    /// The sender address. The node wallet's default address is used if not given.
    #[arg(long, value_parser = parse_address)]
    from: Option<Address>,
    /// Gas premium in attoFIL. Zero lets the node estimate it.
    #[arg(long, value_parser = parse_token_amount_from_atto, default_value = "0")]
    gas_premium: TokenAmount,
    /// Gas fee cap in attoFIL. Zero lets the node estimate it.
    #[arg(long, value_parser = parse_token_amount_from_atto, default_value = "0")]
    gas_feecap: TokenAmount,
    /// Gas limit. Zero lets the node estimate it.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    gas_limit: i64,
    /// Sequence (nonce) for the message. The node assigns one if not given.
    #[arg(long)]
    nonce: Option<u64>,
    /// Method to invoke on the recipient.
    #[arg(long, default_value_t = METHOD_SEND)]
    method: MethodNum,
    /// Method params as JSON, encoded for the recipient's actor type.
    #[arg(long, conflicts_with = "params_hex")]
    params_json: Option<String>,
    /// Method params as hex encoded CBOR.
    #[arg(long)]
    params_hex: Option<String>,
    /// Send even if the sender's balance does not cover the total cost.
    #[arg(long, default_value_t = false)]
    force: bool,
}

impl SendArgs {
    /// Returns true if JSON params need the method registry.
    pub fn needs_registry(&self) -> bool {
        self.params_json.is_some()
    }
}

/// Send command handler.
pub async fn handle_send<C: NodeClient>(
    services: &Services<C>,
    ctx: &CancellationToken,
    args: &SendArgs,
) -> anyhow::Result<()> {
    let params = match (&args.params_json, &args.params_hex) {
        (Some(json), _) => {
            services
                .decode_typed_params_from_json(ctx, args.to, args.method, json)
                .await?
        }
        (None, Some(hex_params)) => RawBytes::new(
            hex::decode(hex_params.trim_start_matches("0x"))
                .map_err(|e| anyhow!("invalid hex params: {}", e))?,
        ),
        (None, None) => RawBytes::default(),
    };

    let cid = services
        .send(
            ctx,
            SendParams {
                to: args.to,
                from: args.from,
                value: args.amount.clone(),
                gas_premium: args.gas_premium.clone(),
                gas_fee_cap: args.gas_feecap.clone(),
                gas_limit: args.gas_limit,
                nonce: Nonce::from(args.nonce),
                method: args.method,
                params,
                force: args.force,
            },
        )
        .await?;

    print_json(&json!({"cid": cid.to_string()}))
}
