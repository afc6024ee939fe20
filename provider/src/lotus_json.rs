// Copyright 2025 Recall Contributors
// Copyright 2022-2024 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

//! Serde adapters for the JSON dialect spoken by Lotus nodes.
//!
//! Lotus renders structs with PascalCase field names, addresses as strings,
//! token amounts as decimal attoFIL strings, byte slices as base64 (or `null`
//! when empty), and CIDs as `{"/": "<cid>"}` links. The CBOR types from
//! `fvm_shared` don't know any of this, so the wire shapes are expressed here
//! as serde remote derives over the canonical types.

use std::fmt::Display;
use std::str::FromStr;

use base64::Engine;
use fvm_shared::{address::Address, econ::TokenAmount, message::Message};
use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

use crate::message::{RawBytes, Signature, SignatureType, SignedMessage};
use crate::util::parse_address;

/// Lotus JSON shape of [`Message`].
#[derive(Serialize, Deserialize)]
#[serde(remote = "Message", rename_all = "PascalCase")]
pub struct MessageJson {
    pub version: u64,
    #[serde(with = "address")]
    pub to: Address,
    #[serde(with = "address")]
    pub from: Address,
    #[serde(rename = "Nonce")]
    pub sequence: u64,
    #[serde(with = "token_amount")]
    pub value: TokenAmount,
    pub gas_limit: u64,
    #[serde(with = "token_amount")]
    pub gas_fee_cap: TokenAmount,
    #[serde(with = "token_amount")]
    pub gas_premium: TokenAmount,
    #[serde(rename = "Method")]
    pub method_num: u64,
    #[serde(with = "raw_bytes")]
    pub params: RawBytes,
}

/// Lotus JSON shape of [`Signature`].
#[derive(Serialize, Deserialize)]
#[serde(remote = "Signature")]
pub struct SignatureJson {
    #[serde(rename = "Type", with = "signature_type")]
    pub sig_type: SignatureType,
    #[serde(rename = "Data", with = "bytes")]
    pub bytes: Vec<u8>,
}

/// Lotus JSON shape of [`SignedMessage`].
#[derive(Serialize, Deserialize)]
#[serde(remote = "SignedMessage", rename_all = "PascalCase")]
pub struct SignedMessageJson {
    #[serde(with = "MessageJson")]
    pub message: Message,
    #[serde(with = "SignatureJson")]
    pub signature: Signature,
}

/// Owned wrapper that (de)serializes a [`Message`] as Lotus JSON.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LotusMessage(#[serde(with = "MessageJson")] pub Message);

/// Owned wrapper that (de)serializes a [`SignedMessage`] as Lotus JSON.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LotusSignedMessage(#[serde(with = "SignedMessageJson")] pub SignedMessage);

/// JSON serialization friendly version of [`cid::Cid`], rendered as a Lotus link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cid(pub cid::Cid);

impl From<cid::Cid> for Cid {
    fn from(v: cid::Cid) -> Self {
        Self(v)
    }
}

impl FromStr for Cid {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(cid::Cid::try_from(s)?))
    }
}

impl Display for Cid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize)]
struct Link {
    #[serde(rename = "/")]
    cid: String,
}

impl<'de> Deserialize<'de> for Cid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let link = Link::deserialize(deserializer)?;
        Self::from_str(&link.cid).map_err(|e| D::Error::custom(format!("{e}")))
    }
}

impl Serialize for Cid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Link {
            cid: self.to_string(),
        }
        .serialize(serializer)
    }
}

/// Addresses as their string form, e.g. `f01234`.
pub mod address {
    use super::*;

    pub fn serialize<S: Serializer>(addr: &Address, serializer: S) -> Result<S::Ok, S::Error> {
        addr.to_string().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Address, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_address(&s).map_err(|e| D::Error::custom(format!("invalid address '{s}': {e}")))
    }
}

/// Address lists; `null` decodes as an empty list.
pub mod address_vec {
    use super::*;

    pub fn serialize<S: Serializer>(addrs: &[Address], serializer: S) -> Result<S::Ok, S::Error> {
        addrs
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Address>, D::Error> {
        let list = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();
        list.iter()
            .map(|s| {
                parse_address(s).map_err(|e| D::Error::custom(format!("invalid address '{s}': {e}")))
            })
            .collect()
    }
}

/// Token amounts as decimal attoFIL strings.
pub mod token_amount {
    use fvm_shared::bigint::BigInt;

    use super::*;

    pub fn serialize<S: Serializer>(
        amount: &TokenAmount,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        amount.atto().to_string().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<TokenAmount, D::Error> {
        let s = String::deserialize(deserializer)?;
        let atto = BigInt::from_str(&s)
            .map_err(|e| D::Error::custom(format!("invalid token amount '{s}': {e}")))?;
        Ok(TokenAmount::from_atto(atto))
    }
}

/// Byte vectors as base64; `null` decodes as empty.
pub mod bytes {
    use super::*;

    pub fn serialize<S: Serializer>(bz: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        if bz.is_empty() {
            return serializer.serialize_none();
        }
        base64::engine::general_purpose::STANDARD
            .encode(bz)
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Vec::new()),
            Some(b64) => base64::engine::general_purpose::STANDARD
                .decode(b64)
                .map_err(|e| D::Error::custom(format!("invalid base64: {e}"))),
        }
    }
}

/// Lists of byte vectors as base64 strings; `null` decodes as empty.
pub mod bytes_vec {
    use super::*;

    pub fn serialize<S: Serializer>(list: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        list.iter()
            .map(|bz| base64::engine::general_purpose::STANDARD.encode(bz))
            .collect::<Vec<_>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<u8>>, D::Error> {
        let list = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();
        list.iter()
            .map(|b64| {
                base64::engine::general_purpose::STANDARD
                    .decode(b64)
                    .map_err(|e| D::Error::custom(format!("invalid base64: {e}")))
            })
            .collect()
    }
}

/// CIDs as Lotus links.
pub mod cid_link {
    use super::*;

    pub fn serialize<S: Serializer>(cid: &cid::Cid, serializer: S) -> Result<S::Ok, S::Error> {
        Cid(*cid).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<cid::Cid, D::Error> {
        Ok(Cid::deserialize(deserializer)?.0)
    }
}

/// [`RawBytes`] as base64; `null` decodes as empty.
pub mod raw_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(raw: &RawBytes, serializer: S) -> Result<S::Ok, S::Error> {
        bytes::serialize(raw.bytes(), serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RawBytes, D::Error> {
        Ok(RawBytes::new(bytes::deserialize(deserializer)?))
    }
}

/// Signature types as Lotus' numeric tags.
pub mod signature_type {
    use super::*;

    pub fn serialize<S: Serializer>(t: &SignatureType, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*t as u8)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<SignatureType, D::Error> {
        SignatureType::try_from(u8::deserialize(deserializer)?).map_err(D::Error::custom)
    }
}
