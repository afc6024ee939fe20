// Copyright 2025 Recall Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

//! # Courier Provider
//!
//! Node access for Courier: the [`NodeClient`] seam, message types, Lotus JSON
//! adapters and a JSON-RPC client.

pub mod json_rpc;
pub mod lotus_json;
pub mod message;
mod provider;
pub mod util;

pub use provider::*;

pub use cid;
pub use fvm_ipld_encoding;
pub use fvm_shared;
