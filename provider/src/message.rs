// Copyright 2025 Recall Contributors
// Copyright 2022-2024 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt::{self, Display};

use cid::Cid;
use fvm_ipld_encoding::strict_bytes;
use fvm_ipld_encoding::tuple::{Deserialize_tuple, Serialize_tuple};
use fvm_ipld_encoding::DAG_CBOR;
use multihash::{Code, MultihashDigest};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

pub use crate::{
    fvm_ipld_encoding::RawBytes,
    fvm_shared::{message::Message, MethodNum, METHOD_SEND},
};

/// Signature schemes a node wallet may sign with, tagged as on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SignatureType {
    Secp256k1 = 1,
    Bls = 2,
    /// Secp256k1 over an Ethereum transaction, used by f410 senders.
    Delegated = 3,
}

impl TryFrom<u8> for SignatureType {
    type Error = UnknownSignatureType;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(SignatureType::Secp256k1),
            2 => Ok(SignatureType::Bls),
            3 => Ok(SignatureType::Delegated),
            t => Err(UnknownSignatureType(t)),
        }
    }
}

/// Signature type tag that isn't one of [`SignatureType`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownSignatureType(pub u8);

impl Display for UnknownSignatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported signature type {}", self.0)
    }
}

impl std::error::Error for UnknownSignatureType {}

/// A signature and its scheme.
///
/// Encodes to CBOR as a byte string whose first byte is the type tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub sig_type: SignatureType,
    pub bytes: Vec<u8>,
}

impl Signature {
    pub fn new_secp256k1(bytes: Vec<u8>) -> Self {
        Self {
            sig_type: SignatureType::Secp256k1,
            bytes,
        }
    }

    pub fn new_bls(bytes: Vec<u8>) -> Self {
        Self {
            sig_type: SignatureType::Bls,
            bytes,
        }
    }

    pub fn new_delegated(bytes: Vec<u8>) -> Self {
        Self {
            sig_type: SignatureType::Delegated,
            bytes,
        }
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut bytes = Vec::with_capacity(self.bytes.len() + 1);
        bytes.push(self.sig_type as u8);
        bytes.extend_from_slice(&self.bytes);
        serializer.serialize_bytes(&bytes)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes: Vec<u8> = strict_bytes::deserialize(deserializer)?;
        let (tag, data) = bytes
            .split_first()
            .ok_or_else(|| de::Error::custom("empty signature"))?;
        let sig_type = SignatureType::try_from(*tag).map_err(de::Error::custom)?;
        Ok(Self {
            sig_type,
            bytes: data.to_vec(),
        })
    }
}

/// A [`Message`] together with the signature of its sender.
#[derive(Clone, Debug, PartialEq, Serialize_tuple, Deserialize_tuple)]
pub struct SignedMessage {
    pub message: Message,
    pub signature: Signature,
}

impl SignedMessage {
    /// Returns the content identifier the message pool knows this message by.
    ///
    /// BLS signatures are aggregated in blocks, so BLS messages are identified
    /// by the unsigned message alone.
    pub fn cid(&self) -> anyhow::Result<Cid> {
        match self.signature.sig_type {
            SignatureType::Bls => message_cid(&self.message),
            SignatureType::Secp256k1 | SignatureType::Delegated => cbor_cid(self),
        }
    }
}

/// Returns the content identifier of an unsigned [`Message`].
pub fn message_cid(message: &Message) -> anyhow::Result<Cid> {
    cbor_cid(message)
}

fn cbor_cid<T: Serialize>(value: &T) -> anyhow::Result<Cid> {
    let bytes = fvm_ipld_encoding::to_vec(value)?;
    Ok(Cid::new_v1(DAG_CBOR, Code::Blake2b256.digest(&bytes)))
}

#[cfg(test)]
mod tests {
    use fvm_shared::address::Address;
    use fvm_shared::econ::TokenAmount;

    use super::*;

    fn message() -> Message {
        Message {
            version: Default::default(),
            from: Address::new_id(1000),
            to: Address::new_id(1001),
            sequence: 7,
            value: TokenAmount::from_atto(100),
            method_num: METHOD_SEND,
            params: RawBytes::default(),
            gas_limit: 50,
            gas_fee_cap: TokenAmount::from_atto(1),
            gas_premium: TokenAmount::from_atto(1),
        }
    }

    #[test]
    fn test_bls_cid_is_message_cid() {
        let signed = SignedMessage {
            message: message(),
            signature: Signature::new_bls(vec![1; 96]),
        };
        assert_eq!(signed.cid().unwrap(), message_cid(&signed.message).unwrap());
    }

    #[test]
    fn test_secp_cid_covers_signature() {
        let a = SignedMessage {
            message: message(),
            signature: Signature::new_secp256k1(vec![1; 65]),
        };
        let b = SignedMessage {
            message: message(),
            signature: Signature::new_secp256k1(vec![2; 65]),
        };
        assert_ne!(a.cid().unwrap(), message_cid(&a.message).unwrap());
        assert_ne!(a.cid().unwrap(), b.cid().unwrap());
        assert_eq!(a.cid().unwrap().codec(), DAG_CBOR);
    }

    #[test]
    fn test_delegated_cid_covers_signature() {
        let signed = SignedMessage {
            message: message(),
            signature: Signature::new_delegated(vec![1; 65]),
        };
        let secp = SignedMessage {
            signature: Signature::new_secp256k1(vec![1; 65]),
            ..signed.clone()
        };
        assert_ne!(signed.cid().unwrap(), message_cid(&signed.message).unwrap());
        assert_ne!(signed.cid().unwrap(), secp.cid().unwrap());
    }

    #[test]
    fn test_signature_cbor_is_tagged_bytes() {
        let bytes = fvm_ipld_encoding::to_vec(&Signature::new_delegated(vec![9, 9])).unwrap();
        // byte string of length 3: tag then data
        assert_eq!(bytes, vec![0x43, 3, 9, 9]);

        let decoded: Signature = fvm_ipld_encoding::from_slice(&bytes).unwrap();
        assert_eq!(decoded, Signature::new_delegated(vec![9, 9]));

        assert!(fvm_ipld_encoding::from_slice::<Signature>(&[0x42, 7, 1]).is_err());
        assert!(fvm_ipld_encoding::from_slice::<Signature>(&[0x40]).is_err());
    }
}
