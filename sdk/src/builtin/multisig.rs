// Copyright 2025 Recall Contributors
// Copyright 2022-2024 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

use courier_provider::{
    fvm_ipld_encoding::{
        strict_bytes,
        tuple::{Deserialize_tuple, Serialize_tuple},
        RawBytes,
    },
    fvm_shared::{address::Address, clock::ChainEpoch, econ::TokenAmount, MethodNum},
    lotus_json::{address, bytes, raw_bytes, token_amount},
};
use serde::{Deserialize, Serialize};

use super::lotus_json_params;
use crate::registry::ActorMethods;

/// Multisig transaction ID.
pub type TxnId = i64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum Method {
    Propose = 2,
    Approve = 3,
    Cancel = 4,
    AddSigner = 5,
    RemoveSigner = 6,
    SwapSigner = 7,
    ChangeNumApprovalsThreshold = 8,
    LockBalance = 9,
}

pub(super) fn methods() -> ActorMethods {
    ActorMethods::default()
        .with::<ProposeParams>(Method::Propose as u64, "Propose")
        .with::<TxnIdParams>(Method::Approve as u64, "Approve")
        .with::<TxnIdParams>(Method::Cancel as u64, "Cancel")
        .with::<AddSignerParams>(Method::AddSigner as u64, "AddSigner")
        .with::<RemoveSignerParams>(Method::RemoveSigner as u64, "RemoveSigner")
        .with::<SwapSignerParams>(Method::SwapSigner as u64, "SwapSigner")
        .with::<ChangeNumApprovalsThresholdParams>(
            Method::ChangeNumApprovalsThreshold as u64,
            "ChangeNumApprovalsThreshold",
        )
        .with::<LockBalanceParams>(Method::LockBalance as u64, "LockBalance")
}

/// Proposes a message to be sent from the multisig.
#[derive(Clone, Debug, PartialEq, Serialize_tuple, Deserialize_tuple)]
pub struct ProposeParams {
    pub to: Address,
    pub value: TokenAmount,
    pub method: MethodNum,
    pub params: RawBytes,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "ProposeParams", rename_all = "PascalCase")]
pub struct ProposeParamsJson {
    #[serde(with = "address")]
    pub to: Address,
    #[serde(with = "token_amount")]
    pub value: TokenAmount,
    pub method: MethodNum,
    #[serde(with = "raw_bytes")]
    pub params: RawBytes,
}

/// Identifies a pending transaction, for approval or cancellation.
///
/// The proposal hash is optional; when given it must match the pending
/// transaction.
#[derive(Clone, Debug, PartialEq, Serialize_tuple, Deserialize_tuple)]
pub struct TxnIdParams {
    pub id: TxnId,
    #[serde(with = "strict_bytes")]
    pub proposal_hash: Vec<u8>,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "TxnIdParams")]
pub struct TxnIdParamsJson {
    #[serde(rename = "ID")]
    pub id: TxnId,
    #[serde(rename = "ProposalHash", with = "bytes", default)]
    pub proposal_hash: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Serialize_tuple, Deserialize_tuple)]
pub struct AddSignerParams {
    pub signer: Address,
    pub increase: bool,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "AddSignerParams", rename_all = "PascalCase")]
pub struct AddSignerParamsJson {
    #[serde(with = "address")]
    pub signer: Address,
    pub increase: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize_tuple, Deserialize_tuple)]
pub struct RemoveSignerParams {
    pub signer: Address,
    pub decrease: bool,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "RemoveSignerParams", rename_all = "PascalCase")]
pub struct RemoveSignerParamsJson {
    #[serde(with = "address")]
    pub signer: Address,
    pub decrease: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize_tuple, Deserialize_tuple)]
pub struct SwapSignerParams {
    pub from: Address,
    pub to: Address,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "SwapSignerParams", rename_all = "PascalCase")]
pub struct SwapSignerParamsJson {
    #[serde(with = "address")]
    pub from: Address,
    #[serde(with = "address")]
    pub to: Address,
}

#[derive(Clone, Debug, PartialEq, Serialize_tuple, Deserialize_tuple)]
pub struct ChangeNumApprovalsThresholdParams {
    pub new_threshold: u64,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "ChangeNumApprovalsThresholdParams", rename_all = "PascalCase")]
pub struct ChangeNumApprovalsThresholdParamsJson {
    pub new_threshold: u64,
}

/// Locks `amount` to vest linearly over `unlock_duration` epochs from `start_epoch`.
#[derive(Clone, Debug, PartialEq, Serialize_tuple, Deserialize_tuple)]
pub struct LockBalanceParams {
    pub start_epoch: ChainEpoch,
    pub unlock_duration: ChainEpoch,
    pub amount: TokenAmount,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "LockBalanceParams", rename_all = "PascalCase")]
pub struct LockBalanceParamsJson {
    pub start_epoch: ChainEpoch,
    pub unlock_duration: ChainEpoch,
    #[serde(with = "token_amount")]
    pub amount: TokenAmount,
}

lotus_json_params! {
    ProposeParams => ProposeParamsJson,
    TxnIdParams => TxnIdParamsJson,
    AddSignerParams => AddSignerParamsJson,
    RemoveSignerParams => RemoveSignerParamsJson,
    SwapSignerParams => SwapSignerParamsJson,
    ChangeNumApprovalsThresholdParams => ChangeNumApprovalsThresholdParamsJson,
    LockBalanceParams => LockBalanceParamsJson,
}
