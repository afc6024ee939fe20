// Copyright 2025 Recall Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use courier_provider::{
    cid::Cid,
    fvm_shared::{address::Address, econ::TokenAmount, MethodNum},
};
use thiserror::Error;

/// Errors returned by [`Services`](crate::Services) operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to resolve default sender address: {0}")]
    AddressResolution(#[source] anyhow::Error),

    #[error("gas limit must not be negative, got {0}")]
    NegativeGasLimit(i64),

    #[error("balance of {from} ({balance} FIL) is less than total cost ({required} FIL); force must be specified for this action to have an effect")]
    InsufficientFunds {
        from: Address,
        balance: TokenAmount,
        required: TokenAmount,
    },

    #[error("failed to look up actor {address}: {source}")]
    ActorLookup {
        address: Address,
        #[source]
        source: anyhow::Error,
    },

    #[error("method {method} not found on actor {code}")]
    UnknownMethod { method: MethodNum, code: Cid },

    #[error("unmarshaling input into params type {type_name}: {source}")]
    JsonDecode {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("decoding params as {type_name}: {source}")]
    CborDecode {
        type_name: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to encode params: {0}")]
    Encoding(#[source] anyhow::Error),

    #[error("services already closed")]
    SessionClosed,

    #[error("operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Node(anyhow::Error),
}

/// Result type for [`Services`](crate::Services) operations.
pub type Result<T> = std::result::Result<T, Error>;
