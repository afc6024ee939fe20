// Copyright 2025 Recall Contributors
// Copyright 2022-2024 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

use courier_provider::{
    fvm_ipld_encoding::tuple::{Deserialize_tuple, Serialize_tuple},
    fvm_shared::{address::Address, econ::TokenAmount},
    lotus_json::{address, token_amount},
};
use serde::{Deserialize, Serialize};

use super::lotus_json_params;
use crate::registry::ActorMethods;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum Method {
    AddBalance = 2,
    WithdrawBalance = 3,
}

pub(super) fn methods() -> ActorMethods {
    ActorMethods::default()
        .with::<AddBalanceParams>(Method::AddBalance as u64, "AddBalance")
        .with::<WithdrawBalanceParams>(Method::WithdrawBalance as u64, "WithdrawBalance")
}

/// Adds the message value to the escrow of a provider or client.
///
/// Encoded as the bare address in both CBOR and JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddBalanceParams(pub Address);

#[derive(Serialize, Deserialize)]
#[serde(remote = "AddBalanceParams")]
pub struct AddBalanceParamsJson(#[serde(with = "address")] pub Address);

/// Withdraws escrow held by the market for a provider or client.
#[derive(Clone, Debug, PartialEq, Serialize_tuple, Deserialize_tuple)]
pub struct WithdrawBalanceParams {
    pub provider_or_client: Address,
    pub amount: TokenAmount,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "WithdrawBalanceParams", rename_all = "PascalCase")]
pub struct WithdrawBalanceParamsJson {
    #[serde(with = "address")]
    pub provider_or_client: Address,
    #[serde(with = "token_amount")]
    pub amount: TokenAmount,
}

lotus_json_params! {
    AddBalanceParams => AddBalanceParamsJson,
    WithdrawBalanceParams => WithdrawBalanceParamsJson,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MethodParams;

    #[test]
    fn test_add_balance_is_bare_address() {
        let params = AddBalanceParams::from_lotus_json(r#""f01234""#).unwrap();
        assert_eq!(params, AddBalanceParams(Address::new_id(1234)));
        assert_eq!(
            courier_provider::fvm_ipld_encoding::to_vec(&params).unwrap(),
            courier_provider::fvm_ipld_encoding::to_vec(&Address::new_id(1234)).unwrap()
        );
        assert!(AddBalanceParams::from_lotus_json(r#"{"Address": "f01234"}"#).is_err());
    }
}
