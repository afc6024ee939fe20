// Copyright 2025 Recall Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

//! Method parameter schemas keyed by actor code and method number.

use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Debug};
use std::str::FromStr;
use std::sync::Arc;

use anyhow::anyhow;
use courier_provider::{
    cid::Cid,
    fvm_ipld_encoding::{self, RawBytes},
    fvm_shared::MethodNum,
    util::parse_cid,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::builtin::ActorKind;

/// A method parameter type with a CBOR encoding and a Lotus JSON rendering.
pub trait MethodParams: Serialize + DeserializeOwned + Debug + Send + 'static {
    /// Parses Lotus JSON into a new value.
    fn from_lotus_json(json: &str) -> serde_json::Result<Self>;

    /// Renders the value as Lotus JSON.
    fn to_lotus_json(&self) -> serde_json::Result<serde_json::Value>;
}

/// A decoded parameter value whose concrete type is only known to its schema.
pub trait TypedParams: Debug + Send {
    /// Encodes the value into the CBOR form the method expects.
    fn encode(&self) -> anyhow::Result<RawBytes>;

    /// Renders the value as Lotus JSON.
    fn to_json(&self) -> serde_json::Result<serde_json::Value>;
}

impl<T: MethodParams> TypedParams for T {
    fn encode(&self) -> anyhow::Result<RawBytes> {
        Ok(RawBytes::serialize(self)?)
    }

    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        self.to_lotus_json()
    }
}

type FromJsonFn = fn(&str) -> serde_json::Result<Box<dyn TypedParams>>;
type FromCborFn = fn(&[u8]) -> anyhow::Result<Box<dyn TypedParams>>;

/// Factory for fresh values of one parameter type.
#[derive(Clone, Copy)]
pub struct ParamsSchema {
    type_name: &'static str,
    from_json: FromJsonFn,
    from_cbor: FromCborFn,
}

impl ParamsSchema {
    /// Schema for the parameter type `T`.
    pub fn of<T: MethodParams>() -> Self {
        Self {
            type_name: short_type_name(std::any::type_name::<T>()),
            from_json: from_json::<T>,
            from_cbor: from_cbor::<T>,
        }
    }

    /// Name of the parameter type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Decodes a new value from Lotus JSON.
    pub fn from_json(&self, json: &str) -> serde_json::Result<Box<dyn TypedParams>> {
        (self.from_json)(json)
    }

    /// Decodes a new value from its CBOR encoding.
    pub fn from_cbor(&self, bytes: &[u8]) -> anyhow::Result<Box<dyn TypedParams>> {
        (self.from_cbor)(bytes)
    }
}

impl Debug for ParamsSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ParamsSchema").field(&self.type_name).finish()
    }
}

fn from_json<T: MethodParams>(json: &str) -> serde_json::Result<Box<dyn TypedParams>> {
    Ok(Box::new(T::from_lotus_json(json)?))
}

fn from_cbor<T: MethodParams>(bytes: &[u8]) -> anyhow::Result<Box<dyn TypedParams>> {
    Ok(Box::new(fvm_ipld_encoding::from_slice::<T>(bytes)?))
}

fn short_type_name(name: &'static str) -> &'static str {
    name.rsplit("::").next().unwrap_or(name)
}

/// A method's name and parameter schema.
#[derive(Clone, Copy, Debug)]
pub struct MethodMeta {
    pub name: &'static str,
    pub params: ParamsSchema,
}

/// The methods of one actor type, keyed by method number.
#[derive(Clone, Debug, Default)]
pub struct ActorMethods(BTreeMap<MethodNum, MethodMeta>);

impl ActorMethods {
    /// Adds method `num` taking params of type `T`.
    pub fn with<T: MethodParams>(mut self, num: MethodNum, name: &'static str) -> Self {
        self.0.insert(
            num,
            MethodMeta {
                name,
                params: ParamsSchema::of::<T>(),
            },
        );
        self
    }

    /// Returns the metadata of method `num`.
    pub fn get(&self, num: MethodNum) -> Option<&MethodMeta> {
        self.0.get(&num)
    }

    /// Iterates over methods in ascending method number order.
    pub fn iter(&self) -> impl Iterator<Item = (MethodNum, &MethodMeta)> {
        self.0.iter().map(|(num, meta)| (*num, meta))
    }
}

/// Immutable lookup table from actor code CID to the actor's methods.
#[derive(Clone, Debug, Default)]
pub struct MethodRegistry {
    actors: HashMap<Cid, Arc<ActorMethods>>,
}

impl MethodRegistry {
    /// Registers `methods` under actor `code`, replacing any earlier entry.
    pub fn with_actor(mut self, code: Cid, methods: ActorMethods) -> Self {
        self.actors.insert(code, Arc::new(methods));
        self
    }

    /// Builds a registry of builtin actors from a name to code CID table, as
    /// returned by a node's `StateActorCodeCIDs`. Unknown names are skipped.
    pub fn from_code_cids<'a>(codes: impl IntoIterator<Item = (&'a str, Cid)>) -> Self {
        codes
            .into_iter()
            .fold(Self::default(), |registry, (name, code)| {
                match ActorKind::from_str(name) {
                    Ok(kind) => registry.with_actor(code, kind.methods()),
                    Err(_) => {
                        debug!(name, %code, "no parameter schemas for actor");
                        registry
                    }
                }
            })
    }

    /// Builds a registry from the TOML actor table, e.g.
    ///
    /// ```toml
    /// [actors]
    /// multisig = "bafk2bzace..."
    /// ```
    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        let config: RegistryConfig = toml::from_str(s)?;
        let codes = config
            .actors
            .iter()
            .map(|(name, code)| {
                parse_cid(code)
                    .map(|cid| (name.as_str(), cid))
                    .map_err(|e| anyhow!("invalid code CID for actor {}: {}", name, e))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self::from_code_cids(codes))
    }

    /// Returns the methods of the actor with `code`.
    pub fn actor(&self, code: &Cid) -> Option<&ActorMethods> {
        self.actors.get(code).map(|m| m.as_ref())
    }

    /// Returns the metadata of `method` on the actor with `code`.
    pub fn method(&self, code: &Cid, method: MethodNum) -> Option<&MethodMeta> {
        self.actor(code).and_then(|m| m.get(method))
    }

    /// Returns true if no actors are registered.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

/// On-disk form of the actor code table.
#[derive(Debug, Deserialize)]
struct RegistryConfig {
    #[serde(default)]
    actors: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use courier_provider::fvm_shared::address::Address;
    use courier_provider::message::message_cid;

    use super::*;
    use crate::builtin::multisig::{self, SwapSignerParams};

    fn code(id: u64) -> Cid {
        // Any well-formed CID works as an actor code in tests.
        let message = courier_provider::message::Message {
            version: 0,
            from: Address::new_id(id),
            to: Address::new_id(id),
            sequence: 0,
            value: Default::default(),
            method_num: 0,
            params: Default::default(),
            gas_limit: 0,
            gas_fee_cap: Default::default(),
            gas_premium: Default::default(),
        };
        message_cid(&message).unwrap()
    }

    #[test]
    fn test_method_lookup() {
        let registry = MethodRegistry::default().with_actor(code(1), ActorKind::Multisig.methods());
        let meta = registry
            .method(&code(1), multisig::Method::SwapSigner as u64)
            .unwrap();
        assert_eq!(meta.name, "SwapSigner");
        assert_eq!(meta.params.type_name(), "SwapSignerParams");
        assert!(registry.method(&code(1), 1000).is_none());
        assert!(registry.method(&code(2), 2).is_none());
    }

    #[test]
    fn test_schema_builds_fresh_values() {
        let schema = ParamsSchema::of::<SwapSignerParams>();
        let a = schema.from_json(r#"{"From": "f01", "To": "f02"}"#).unwrap();
        let b = schema.from_json(r#"{"From": "f03", "To": "f04"}"#).unwrap();
        assert_ne!(a.encode().unwrap(), b.encode().unwrap());
        assert_eq!(
            a.encode().unwrap(),
            RawBytes::serialize(SwapSignerParams {
                from: Address::new_id(1),
                to: Address::new_id(2),
            })
            .unwrap()
        );
    }

    #[test]
    fn test_from_code_cids_skips_unknown() {
        let registry = MethodRegistry::from_code_cids([("multisig", code(1)), ("cron", code(2))]);
        assert!(registry.actor(&code(1)).is_some());
        assert!(registry.actor(&code(2)).is_none());
    }

    #[test]
    fn test_from_toml() {
        let toml = format!(
            "[actors]\nmultisig = \"{}\"\nstorageminer = \"{}\"\n",
            code(1),
            code(2)
        );
        let registry = MethodRegistry::from_toml(&toml).unwrap();
        assert!(registry.method(&code(1), 2).is_some());
        assert!(registry.method(&code(2), 16).is_some());

        assert!(MethodRegistry::from_toml("[actors]\nmultisig = \"nope\"\n").is_err());
        assert!(MethodRegistry::from_toml("").unwrap().is_empty());
    }
}
