// Copyright 2025 Recall Contributors
// Copyright 2022-2024 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

use courier_provider::{
    fvm_ipld_encoding::tuple::{Deserialize_tuple, Serialize_tuple},
    fvm_shared::{address::Address, econ::TokenAmount},
    lotus_json::{address, address_vec, token_amount},
};
use serde::{Deserialize, Serialize};

use super::lotus_json_params;
use crate::registry::ActorMethods;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum Method {
    ChangeWorkerAddress = 3,
    WithdrawBalance = 16,
}

pub(super) fn methods() -> ActorMethods {
    ActorMethods::default()
        .with::<ChangeWorkerAddressParams>(
            Method::ChangeWorkerAddress as u64,
            "ChangeWorkerAddress",
        )
        .with::<WithdrawBalanceParams>(Method::WithdrawBalance as u64, "WithdrawBalance")
}

#[derive(Clone, Debug, PartialEq, Serialize_tuple, Deserialize_tuple)]
pub struct ChangeWorkerAddressParams {
    pub new_worker: Address,
    pub new_control_addresses: Vec<Address>,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "ChangeWorkerAddressParams")]
pub struct ChangeWorkerAddressParamsJson {
    #[serde(rename = "NewWorker", with = "address")]
    pub new_worker: Address,
    #[serde(rename = "NewControlAddrs", with = "address_vec", default)]
    pub new_control_addresses: Vec<Address>,
}

#[derive(Clone, Debug, PartialEq, Serialize_tuple, Deserialize_tuple)]
pub struct WithdrawBalanceParams {
    pub amount_requested: TokenAmount,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "WithdrawBalanceParams", rename_all = "PascalCase")]
pub struct WithdrawBalanceParamsJson {
    #[serde(with = "token_amount")]
    pub amount_requested: TokenAmount,
}

lotus_json_params! {
    ChangeWorkerAddressParams => ChangeWorkerAddressParamsJson,
    WithdrawBalanceParams => WithdrawBalanceParamsJson,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MethodParams;

    #[test]
    fn test_change_worker_from_json() {
        let params = ChangeWorkerAddressParams::from_lotus_json(
            r#"{"NewWorker": "f0100", "NewControlAddrs": ["f0101", "t0102"]}"#,
        )
        .unwrap();
        assert_eq!(params.new_worker, Address::new_id(100));
        assert_eq!(
            params.new_control_addresses,
            vec![Address::new_id(101), Address::new_id(102)]
        );

        let params =
            ChangeWorkerAddressParams::from_lotus_json(r#"{"NewWorker": "f0100", "NewControlAddrs": null}"#)
                .unwrap();
        assert!(params.new_control_addresses.is_empty());
    }

    #[test]
    fn test_withdraw_balance_rejects_number() {
        assert!(WithdrawBalanceParams::from_lotus_json(r#"{"AmountRequested": 10}"#).is_err());
        let params =
            WithdrawBalanceParams::from_lotus_json(r#"{"AmountRequested": "10"}"#).unwrap();
        assert_eq!(params.amount_requested, TokenAmount::from_atto(10));
    }
}
