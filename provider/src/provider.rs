// Copyright 2025 Recall Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use async_trait::async_trait;
use cid::Cid;
use fvm_shared::{address::Address, econ::TokenAmount};

use crate::message::{Message, SignedMessage};

/// The chain state a query is evaluated against.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StateRef {
    /// The node's current head tipset.
    #[default]
    Head,
    /// A specific tipset, identified by the CIDs of its blocks.
    TipSet(Vec<Cid>),
}

/// Node operations needed to fund, sequence, sign and push messages.
///
/// Every method is a single round-trip to the node. Implementations must not
/// retry on their own; a failed push may still have reached the message pool.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Returns the node wallet's default address.
    async fn default_address(&self) -> anyhow::Result<Address>;

    /// Returns the balance held by `address`.
    async fn wallet_balance(&self, address: &Address) -> anyhow::Result<TokenAmount>;

    /// Signs `message` exactly as given with the key behind `address`.
    async fn wallet_sign_message(
        &self,
        address: &Address,
        message: &Message,
    ) -> anyhow::Result<SignedMessage>;

    /// Pushes an already signed message into the message pool.
    async fn mpool_push(&self, message: &SignedMessage) -> anyhow::Result<Cid>;

    /// Lets the node assign the sequence, sign and push `message`.
    async fn mpool_push_message(&self, message: &Message) -> anyhow::Result<SignedMessage>;

    /// Returns the code CID of the actor at `address`.
    async fn state_get_actor_code(&self, address: &Address, at: &StateRef)
        -> anyhow::Result<Cid>;
}
