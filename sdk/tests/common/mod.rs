// Copyright 2025 Recall Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use courier_provider::{
    cid::Cid,
    fvm_ipld_encoding::RawBytes,
    fvm_shared::{address::Address, econ::TokenAmount},
    message::{message_cid, Message, Signature, SignedMessage},
    NodeClient, StateRef,
};
use tokio::sync::Notify;

/// Sequence the mock node assigns to auto-sequenced messages.
#[allow(dead_code)]
pub const NODE_SEQUENCE: u64 = 42;

/// A node round-trip observed by [`MockNode`].
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    DefaultAddress,
    WalletBalance(Address),
    WalletSignMessage(Address, Message),
    MpoolPush(SignedMessage),
    MpoolPushMessage(Message),
    StateGetActorCode(Address, StateRef),
}

/// In-memory [`NodeClient`] that records every call.
#[derive(Debug)]
pub struct MockNode {
    /// Wallet default address; `None` makes the lookup fail.
    pub default_address: Option<Address>,
    pub balance: TokenAmount,
    /// Actor code CIDs; missing addresses fail the lookup.
    pub codes: HashMap<Address, Cid>,
    pub fail_push: bool,
    /// When set, the balance query is signalled here and then never answers.
    pub stall_balance: Option<Arc<Notify>>,
    pub calls: Arc<Mutex<Vec<Call>>>,
}

impl Default for MockNode {
    fn default() -> Self {
        Self {
            default_address: Some(Address::new_id(100)),
            balance: TokenAmount::from_atto(1_000_000),
            codes: HashMap::new(),
            fail_push: false,
            stall_balance: None,
            calls: Default::default(),
        }
    }
}

impl MockNode {
    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Returns a snapshot of recorded calls.
#[allow(dead_code)]
pub fn calls(calls: &Arc<Mutex<Vec<Call>>>) -> Vec<Call> {
    calls.lock().unwrap().clone()
}

/// Returns a well-formed CID standing in for an actor code.
#[allow(dead_code)]
pub fn code_cid(name: &str) -> Cid {
    let message = Message {
        version: 0,
        from: Address::new_id(0),
        to: Address::new_id(0),
        sequence: 0,
        value: TokenAmount::default(),
        method_num: 0,
        params: RawBytes::new(name.as_bytes().to_vec()),
        gas_limit: 0,
        gas_fee_cap: TokenAmount::default(),
        gas_premium: TokenAmount::default(),
    };
    message_cid(&message).unwrap()
}

/// Signs `message` the way [`MockNode`] does.
#[allow(dead_code)]
pub fn sign(message: &Message) -> SignedMessage {
    SignedMessage {
        message: message.clone(),
        signature: Signature::new_secp256k1(vec![7; 65]),
    }
}

#[async_trait]
impl NodeClient for MockNode {
    async fn default_address(&self) -> anyhow::Result<Address> {
        self.record(Call::DefaultAddress);
        self.default_address
            .ok_or_else(|| anyhow!("no default wallet address"))
    }

    async fn wallet_balance(&self, address: &Address) -> anyhow::Result<TokenAmount> {
        self.record(Call::WalletBalance(*address));
        if let Some(entered) = &self.stall_balance {
            entered.notify_one();
            std::future::pending::<()>().await;
        }
        Ok(self.balance.clone())
    }

    async fn wallet_sign_message(
        &self,
        address: &Address,
        message: &Message,
    ) -> anyhow::Result<SignedMessage> {
        self.record(Call::WalletSignMessage(*address, message.clone()));
        Ok(sign(message))
    }

    async fn mpool_push(&self, message: &SignedMessage) -> anyhow::Result<Cid> {
        self.record(Call::MpoolPush(message.clone()));
        if self.fail_push {
            return Err(anyhow!("mpool is full"));
        }
        message.cid()
    }

    async fn mpool_push_message(&self, message: &Message) -> anyhow::Result<SignedMessage> {
        self.record(Call::MpoolPushMessage(message.clone()));
        if self.fail_push {
            return Err(anyhow!("mpool is full"));
        }
        let mut message = message.clone();
        message.sequence = NODE_SEQUENCE;
        Ok(sign(&message))
    }

    async fn state_get_actor_code(
        &self,
        address: &Address,
        at: &StateRef,
    ) -> anyhow::Result<Cid> {
        self.record(Call::StateGetActorCode(*address, at.clone()));
        self.codes
            .get(address)
            .copied()
            .ok_or_else(|| anyhow!("actor {} not found", address))
    }
}
