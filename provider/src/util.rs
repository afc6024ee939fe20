// Copyright 2025 Recall Contributors
// Copyright 2022-2024 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

use std::str::FromStr;

use anyhow::{anyhow, bail};
use cid::Cid;
use fvm_shared::{
    address::{Address, Error, Network},
    bigint::BigInt,
    econ::TokenAmount,
};
use rust_decimal::Decimal;

/// Actor ID of the Ethereum Address Manager, the namespace of f410 addresses.
const EAM_ACTOR_ID: u64 = 10;

/// Parse an f/t/eth-address from string.
pub fn parse_address(s: &str) -> anyhow::Result<Address> {
    if let Some(hex_addr) = s.strip_prefix("0x") {
        return parse_eth_address(hex_addr);
    }
    let addr = Network::Mainnet.parse_address(s).or_else(|e| match e {
        Error::UnknownNetwork => Network::Testnet.parse_address(s),
        _ => Err(e),
    })?;
    Ok(addr)
}

/// Converts a hex encoded Ethereum address into its delegated f410 form.
fn parse_eth_address(hex_addr: &str) -> anyhow::Result<Address> {
    let bytes = hex::decode(hex_addr)?;
    if bytes.len() != 20 {
        bail!("ethereum address must be 20 bytes, got {}", bytes.len());
    }
    Ok(Address::new_delegated(EAM_ACTOR_ID, &bytes)?)
}

/// Parse the token amount from string.
pub fn parse_token_amount(s: &str) -> anyhow::Result<TokenAmount> {
    let decimal = Decimal::from_str(s)?;
    if decimal.is_sign_negative() {
        bail!("token amount '{}' must not be negative", s);
    }

    // Scale the decimal to atto (10^18)
    let decimal_in_attos = decimal
        .checked_mul(Decimal::new(1_000_000_000_000_000_000, 0))
        .ok_or(anyhow!("overflow occurred when scaling '{}'", s))?;

    Ok(TokenAmount::from_atto(BigInt::from_str(
        &decimal_in_attos.trunc().to_string(),
    )?))
}

/// Parse the token amount in attoFIL (10**18) from string.
pub fn parse_token_amount_from_atto(s: &str) -> anyhow::Result<TokenAmount> {
    Ok(TokenAmount::from_atto(BigInt::from_str(s)?))
}

/// Parse a CID from its string form.
pub fn parse_cid(s: &str) -> anyhow::Result<Cid> {
    Ok(Cid::try_from(s)?)
}
