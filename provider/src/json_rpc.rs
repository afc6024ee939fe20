// Copyright 2025 Recall Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use cid::Cid;
use fvm_shared::{address::Address, econ::TokenAmount};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::lotus_json::{self, LotusMessage, LotusSignedMessage};
use crate::message::{Message, SignedMessage};
use crate::provider::{NodeClient, StateRef};
use crate::util::{parse_address, parse_token_amount_from_atto};

pub use reqwest::Url;

const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(60);

/// A [`NodeClient`] that talks to a Lotus compatible node over JSON-RPC 2.0 / HTTP.
#[derive(Debug)]
pub struct JsonRpcProvider {
    inner: reqwest::Client,
    url: Url,
    next_id: AtomicU64,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Actor fields we care about from `StateGetActor`.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ActorJson {
    code: lotus_json::Cid,
}

impl JsonRpcProvider {
    /// Creates a provider for the node at `url`.
    ///
    /// `token` is sent as a bearer token with every request. Nodes require one
    /// for the wallet and message pool methods.
    pub fn new_http(
        url: Url,
        token: Option<String>,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .context("invalid rpc token")?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        let inner = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout.unwrap_or(DEFAULT_RPC_TIMEOUT))
            .build()?;
        Ok(Self {
            inner,
            url,
            next_id: AtomicU64::new(1),
        })
    }

    /// Calls `Filecoin.<method>` and decodes a non-null result.
    async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> anyhow::Result<T> {
        self.request_opt(method, params)
            .await?
            .ok_or_else(|| anyhow!("{method} returned an empty result"))
    }

    /// Calls `Filecoin.<method>`; a `null` result yields `None`.
    async fn request_opt<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> anyhow::Result<Option<T>> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "method": format!("Filecoin.{method}"),
            "params": params,
            "id": id,
        });
        debug!(method, id, "rpc request");

        let response = self
            .inner
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .with_context(|| format!("error calling {method}"))?
            .error_for_status()?;
        let response: RpcResponse<T> = response
            .json()
            .await
            .with_context(|| format!("error parsing {method} response"))?;

        if let Some(err) = response.error {
            return Err(anyhow!(
                "{method} failed: code={} message={}",
                err.code,
                err.message
            ));
        }
        Ok(response.result)
    }

    /// Returns the network version at the node's head.
    pub async fn network_version(&self) -> anyhow::Result<u32> {
        self.request("StateNetworkVersion", json!([state_ref_json(&StateRef::Head)]))
            .await
    }

    /// Returns builtin actor code CIDs keyed by actor name, e.g. `multisig`.
    pub async fn actor_code_cids(&self, network_version: u32) -> anyhow::Result<HashMap<String, Cid>> {
        let cids: HashMap<String, lotus_json::Cid> = self
            .request("StateActorCodeCIDs", json!([network_version]))
            .await?;
        Ok(cids.into_iter().map(|(name, cid)| (name, cid.0)).collect())
    }
}

fn state_ref_json(at: &StateRef) -> Value {
    match at {
        StateRef::Head => json!([]),
        StateRef::TipSet(cids) => json!(cids
            .iter()
            .map(|c| lotus_json::Cid(*c))
            .collect::<Vec<_>>()),
    }
}

#[async_trait]
impl NodeClient for JsonRpcProvider {
    async fn default_address(&self) -> anyhow::Result<Address> {
        let addr: String = self.request("WalletDefaultAddress", json!([])).await?;
        parse_address(&addr)
    }

    async fn wallet_balance(&self, address: &Address) -> anyhow::Result<TokenAmount> {
        let balance: String = self
            .request("WalletBalance", json!([address.to_string()]))
            .await?;
        parse_token_amount_from_atto(&balance)
    }

    async fn wallet_sign_message(
        &self,
        address: &Address,
        message: &Message,
    ) -> anyhow::Result<SignedMessage> {
        let signed: LotusSignedMessage = self
            .request(
                "WalletSignMessage",
                json!([address.to_string(), LotusMessage(message.clone())]),
            )
            .await?;
        Ok(signed.0)
    }

    async fn mpool_push(&self, message: &SignedMessage) -> anyhow::Result<Cid> {
        let cid: lotus_json::Cid = self
            .request("MpoolPush", json!([LotusSignedMessage(message.clone())]))
            .await?;
        Ok(cid.0)
    }

    async fn mpool_push_message(&self, message: &Message) -> anyhow::Result<SignedMessage> {
        let signed: LotusSignedMessage = self
            .request(
                "MpoolPushMessage",
                json!([LotusMessage(message.clone()), Value::Null]),
            )
            .await?;
        Ok(signed.0)
    }

    async fn state_get_actor_code(
        &self,
        address: &Address,
        at: &StateRef,
    ) -> anyhow::Result<Cid> {
        let actor: Option<ActorJson> = self
            .request_opt(
                "StateGetActor",
                json!([address.to_string(), state_ref_json(at)]),
            )
            .await?;
        actor
            .map(|a| a.code.0)
            .ok_or_else(|| anyhow!("actor {} not found", address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_ref_json() {
        assert_eq!(state_ref_json(&StateRef::Head), json!([]));
        let cid = crate::message::message_cid(&crate::message::Message {
            version: 0,
            from: Address::new_id(1),
            to: Address::new_id(2),
            sequence: 0,
            value: TokenAmount::default(),
            method_num: 0,
            params: Default::default(),
            gas_limit: 0,
            gas_fee_cap: TokenAmount::default(),
            gas_premium: TokenAmount::default(),
        })
        .unwrap();
        assert_eq!(
            state_ref_json(&StateRef::TipSet(vec![cid])),
            json!([{ "/": cid.to_string() }])
        );
    }

    #[test]
    fn test_rpc_error_response() {
        let response: RpcResponse<String> = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": 1, "message": "actor not found"},
        }))
        .unwrap();
        assert!(response.result.is_none());
        assert_eq!(response.error.unwrap().message, "actor not found");
    }

    #[test]
    fn test_new_http_rejects_bad_token() {
        let url = Url::parse("http://127.0.0.1:1234/rpc/v1").unwrap();
        assert!(JsonRpcProvider::new_http(url.clone(), Some("ok".into()), None).is_ok());
        assert!(JsonRpcProvider::new_http(url, Some("bad\ntoken".into()), None).is_err());
    }
}
