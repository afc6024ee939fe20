// Copyright 2025 Recall Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use courier_provider::{
    cid::Cid,
    fvm_ipld_encoding::RawBytes,
    fvm_shared::{address::Address, MethodNum},
    NodeClient, StateRef,
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{Error, Result};
use crate::registry::MethodMeta;
use crate::services::{call, Services};

impl<C: NodeClient> Services<C> {
    /// Converts JSON params for `method` on the actor at `to` into their CBOR encoding.
    ///
    /// The params type is looked up in the registry by the actor's code CID
    /// at the node's head.
    pub async fn decode_typed_params_from_json(
        &self,
        ctx: &CancellationToken,
        to: Address,
        method: MethodNum,
        json: &str,
    ) -> Result<RawBytes> {
        let meta = self.method_meta(ctx, to, method).await?;
        let schema = meta.params;

        let params = schema.from_json(json).map_err(|source| Error::JsonDecode {
            type_name: schema.type_name(),
            source,
        })?;
        let encoded = params.encode().map_err(Error::Encoding)?;
        debug!(%to, method = meta.name, len = encoded.bytes().len(), "encoded params");
        Ok(encoded)
    }

    /// Renders CBOR params for `method` on the actor at `to` as Lotus JSON.
    pub async fn decode_params_to_json(
        &self,
        ctx: &CancellationToken,
        to: Address,
        method: MethodNum,
        params: &RawBytes,
    ) -> Result<serde_json::Value> {
        let meta = self.method_meta(ctx, to, method).await?;
        let schema = meta.params;

        let params = schema
            .from_cbor(params.bytes())
            .map_err(|source| Error::CborDecode {
                type_name: schema.type_name(),
                source,
            })?;
        params.to_json().map_err(|e| Error::Encoding(e.into()))
    }

    /// Lists the methods with known params on the actor at `to`, in method
    /// number order. Actors without registered schemas have none.
    pub async fn actor_methods(
        &self,
        ctx: &CancellationToken,
        to: Address,
    ) -> Result<Vec<(MethodNum, MethodMeta)>> {
        let code = self.actor_code(ctx, to).await?;
        Ok(self
            .registry
            .actor(&code)
            .map(|methods| methods.iter().map(|(num, meta)| (num, *meta)).collect())
            .unwrap_or_default())
    }

    async fn actor_code(&self, ctx: &CancellationToken, to: Address) -> Result<Cid> {
        let client = self.client()?;
        call(
            ctx,
            client.state_get_actor_code(&to, &StateRef::Head),
            |source| Error::ActorLookup {
                address: to,
                source,
            },
        )
        .await
    }

    async fn method_meta(
        &self,
        ctx: &CancellationToken,
        to: Address,
        method: MethodNum,
    ) -> Result<MethodMeta> {
        let code = self.actor_code(ctx, to).await?;
        self.registry
            .method(&code, method)
            .copied()
            .ok_or(Error::UnknownMethod { method, code })
    }
}
