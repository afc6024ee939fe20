// Copyright 2025 Recall Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use courier_provider::{
    cid::Cid,
    fvm_ipld_encoding::RawBytes,
    fvm_shared::{address::Address, bigint::BigInt, econ::TokenAmount, MethodNum, METHOD_SEND},
    message::Message,
    NodeClient,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::services::{call, Services};

/// How the message sequence (nonce) is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Nonce {
    /// The node assigns the next sequence, signs and pushes.
    #[default]
    Unset,
    /// The caller pins the sequence. The message is signed with exactly this
    /// value and pushed as is.
    Pinned(u64),
}

impl From<Option<u64>> for Nonce {
    fn from(v: Option<u64>) -> Self {
        v.map_or(Nonce::Unset, Nonce::Pinned)
    }
}

/// Arguments for [`Services::send`].
#[derive(Clone, Debug)]
pub struct SendParams {
    /// Recipient address.
    pub to: Address,
    /// Sender address. The node wallet's default address is used if `None`.
    pub from: Option<Address>,
    /// Value to transfer.
    pub value: TokenAmount,
    /// Gas premium.
    pub gas_premium: TokenAmount,
    /// Maximum price per unit of gas.
    pub gas_fee_cap: TokenAmount,
    /// Maximum amount of gas that can be charged. Must not be negative.
    pub gas_limit: i64,
    /// Sender sequence.
    pub nonce: Nonce,
    /// Method to invoke on the recipient; [`METHOD_SEND`] for a plain transfer.
    pub method: MethodNum,
    /// CBOR encoded method params.
    pub params: RawBytes,
    /// Skip the balance check.
    pub force: bool,
}

impl SendParams {
    /// Plain value transfer with node-estimated gas and node-assigned sequence.
    pub fn transfer(to: Address, value: TokenAmount) -> Self {
        Self {
            to,
            from: None,
            value,
            gas_premium: TokenAmount::default(),
            gas_fee_cap: TokenAmount::default(),
            gas_limit: 0,
            nonce: Nonce::Unset,
            method: METHOD_SEND,
            params: RawBytes::default(),
            force: false,
        }
    }
}

/// Returns `gas_fee_cap * gas_limit + value`, the most `message` can cost its sender.
pub fn total_cost(message: &Message) -> TokenAmount {
    let gas = message.gas_fee_cap.atto() * BigInt::from(message.gas_limit);
    TokenAmount::from_atto(gas + message.value.atto())
}

impl<C: NodeClient> Services<C> {
    /// Builds a message from `params` and pushes it to the node's message pool.
    ///
    /// Returns the CID of the pushed message. A returned error does not prove
    /// that nothing was pushed: a failure or cancellation during the final
    /// push may happen after the node accepted the message.
    pub async fn send(&self, ctx: &CancellationToken, params: SendParams) -> Result<Cid> {
        let client = self.client()?;

        let from = match params.from {
            Some(from) => from,
            None => {
                let addr = call(ctx, client.default_address(), Error::AddressResolution).await?;
                debug!(from = %addr, "resolved default sender");
                addr
            }
        };

        let gas_limit =
            u64::try_from(params.gas_limit).map_err(|_| Error::NegativeGasLimit(params.gas_limit))?;
        let mut message = Message {
            version: Default::default(),
            from,
            to: params.to,
            sequence: 0,
            value: params.value,
            method_num: params.method,
            params: params.params,
            gas_limit,
            gas_fee_cap: params.gas_fee_cap,
            gas_premium: params.gas_premium,
        };

        if !params.force {
            let balance = call(ctx, client.wallet_balance(&message.from), Error::Node).await?;
            let required = total_cost(&message);
            if balance < required {
                warn!(
                    "From balance {} FIL less than total cost {} FIL",
                    balance, required
                );
                return Err(Error::InsufficientFunds {
                    from: message.from,
                    balance,
                    required,
                });
            }
        }

        let cid = match params.nonce {
            Nonce::Pinned(sequence) => {
                message.sequence = sequence;
                let signed = call(
                    ctx,
                    client.wallet_sign_message(&message.from, &message),
                    Error::Node,
                )
                .await?;
                call(ctx, client.mpool_push(&signed), Error::Node).await?
            }
            Nonce::Unset => {
                let signed = call(ctx, client.mpool_push_message(&message), Error::Node).await?;
                signed.cid().map_err(Error::Encoding)?
            }
        };

        info!(%cid, to = %message.to, method = message.method_num, "pushed message");
        Ok(cid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_cost_does_not_truncate() {
        let message = Message {
            version: 0,
            from: Address::new_id(1),
            to: Address::new_id(2),
            sequence: 0,
            value: TokenAmount::from_atto(7),
            method_num: METHOD_SEND,
            params: RawBytes::default(),
            gas_limit: u64::MAX,
            gas_fee_cap: TokenAmount::from_atto(u64::MAX),
            gas_premium: TokenAmount::default(),
        };
        let expected = BigInt::from(u64::MAX) * BigInt::from(u64::MAX) + BigInt::from(7);
        assert_eq!(total_cost(&message), TokenAmount::from_atto(expected));
    }

    #[test]
    fn test_nonce_from_option() {
        assert_eq!(Nonce::from(None), Nonce::Unset);
        assert_eq!(Nonce::from(Some(5)), Nonce::Pinned(5));
    }
}
