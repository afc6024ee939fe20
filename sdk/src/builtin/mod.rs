// Copyright 2025 Recall Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

//! Parameter schemas for builtin actors.
//!
//! Each params type carries its canonical CBOR encoding through
//! `Serialize_tuple`/`Deserialize_tuple` and its Lotus JSON shape through a
//! serde remote derive named `<Type>Json`.

use std::fmt::Display;
use std::str::FromStr;

use anyhow::anyhow;

use crate::registry::ActorMethods;

pub mod init;
pub mod market;
pub mod miner;
pub mod multisig;
pub mod power;

/// Implements [`MethodParams`](crate::registry::MethodParams) for a params type
/// using its Lotus JSON remote shape.
macro_rules! lotus_json_params {
    ($($params:ty => $json:ty),* $(,)?) => {$(
        impl $crate::registry::MethodParams for $params {
            fn from_lotus_json(json: &str) -> serde_json::Result<Self> {
                let mut de = serde_json::Deserializer::from_str(json);
                let params = <$json>::deserialize(&mut de)?;
                de.end()?;
                Ok(params)
            }

            fn to_lotus_json(&self) -> serde_json::Result<serde_json::Value> {
                <$json>::serialize(self, serde_json::value::Serializer)
            }
        }
    )*};
}
pub(crate) use lotus_json_params;

/// Builtin actor types with known parameter schemas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActorKind {
    Init,
    Multisig,
    StorageMiner,
    StorageMarket,
    StoragePower,
}

impl ActorKind {
    /// Returns the methods and parameter schemas of this actor type.
    pub fn methods(&self) -> ActorMethods {
        match self {
            ActorKind::Init => init::methods(),
            ActorKind::Multisig => multisig::methods(),
            ActorKind::StorageMiner => miner::methods(),
            ActorKind::StorageMarket => market::methods(),
            ActorKind::StoragePower => power::methods(),
        }
    }
}

impl FromStr for ActorKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "init" => Self::Init,
            "multisig" => Self::Multisig,
            "storageminer" => Self::StorageMiner,
            "storagemarket" => Self::StorageMarket,
            "storagepower" => Self::StoragePower,
            _ => return Err(anyhow!("unknown actor kind '{}'", s)),
        })
    }
}

impl Display for ActorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActorKind::Init => "init",
            ActorKind::Multisig => "multisig",
            ActorKind::StorageMiner => "storageminer",
            ActorKind::StorageMarket => "storagemarket",
            ActorKind::StoragePower => "storagepower",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_kind_names() {
        for kind in [
            ActorKind::Init,
            ActorKind::Multisig,
            ActorKind::StorageMiner,
            ActorKind::StorageMarket,
            ActorKind::StoragePower,
        ] {
            assert_eq!(ActorKind::from_str(&kind.to_string()).unwrap(), kind);
        }
        assert!(ActorKind::from_str("account").is_err());
    }
}
