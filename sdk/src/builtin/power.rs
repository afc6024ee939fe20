// Copyright 2025 Recall Contributors
// Copyright 2022-2024 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

use courier_provider::{
    fvm_ipld_encoding::{
        strict_bytes,
        tuple::{Deserialize_tuple, Serialize_tuple},
    },
    fvm_shared::{address::Address, sector::RegisteredPoStProof},
    lotus_json::{address, bytes},
};
use serde::{Deserialize, Serialize};

use super::lotus_json_params;
use crate::registry::ActorMethods;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum Method {
    CreateMiner = 2,
}

pub(super) fn methods() -> ActorMethods {
    ActorMethods::default().with::<CreateMinerParams>(Method::CreateMiner as u64, "CreateMiner")
}

/// A multiaddr in its binary form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Multiaddr(#[serde(with = "strict_bytes")] pub Vec<u8>);

/// Creates a storage miner actor owned by `owner`.
#[derive(Clone, Debug, PartialEq, Serialize_tuple, Deserialize_tuple)]
pub struct CreateMinerParams {
    pub owner: Address,
    pub worker: Address,
    pub window_post_proof_type: RegisteredPoStProof,
    #[serde(with = "strict_bytes")]
    pub peer: Vec<u8>,
    pub multiaddrs: Vec<Multiaddr>,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "CreateMinerParams", rename_all = "PascalCase")]
pub struct CreateMinerParamsJson {
    #[serde(with = "address")]
    pub owner: Address,
    #[serde(with = "address")]
    pub worker: Address,
    #[serde(rename = "WindowPoStProofType")]
    pub window_post_proof_type: RegisteredPoStProof,
    #[serde(with = "bytes")]
    pub peer: Vec<u8>,
    #[serde(with = "multiaddrs")]
    pub multiaddrs: Vec<Multiaddr>,
}

mod multiaddrs {
    use courier_provider::lotus_json::bytes_vec;
    use serde::{Deserializer, Serializer};

    use super::Multiaddr;

    pub fn serialize<S: Serializer>(addrs: &[Multiaddr], serializer: S) -> Result<S::Ok, S::Error> {
        let raw: Vec<Vec<u8>> = addrs.iter().map(|a| a.0.clone()).collect();
        bytes_vec::serialize(&raw, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Multiaddr>, D::Error> {
        Ok(bytes_vec::deserialize(deserializer)?
            .into_iter()
            .map(Multiaddr)
            .collect())
    }
}

lotus_json_params! {
    CreateMinerParams => CreateMinerParamsJson,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MethodParams;

    #[test]
    fn test_create_miner_json() {
        let params = CreateMinerParams::from_lotus_json(
            r#"{"Owner": "f0100", "Worker": "f0101", "WindowPoStProofType": 8,
                "Peer": "AQI=", "Multiaddrs": null}"#,
        )
        .unwrap();
        assert_eq!(params.owner, Address::new_id(100));
        assert_eq!(params.peer, vec![1, 2]);
        assert!(params.multiaddrs.is_empty());
        assert_eq!(params.window_post_proof_type, RegisteredPoStProof::from(8));
    }
}
