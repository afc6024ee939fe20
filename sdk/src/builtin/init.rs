// Copyright 2025 Recall Contributors
// Copyright 2022-2024 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

use courier_provider::{
    cid::Cid,
    fvm_ipld_encoding::{
        tuple::{Deserialize_tuple, Serialize_tuple},
        RawBytes,
    },
    lotus_json::{cid_link, raw_bytes},
};
use serde::{Deserialize, Serialize};

use super::lotus_json_params;
use crate::registry::ActorMethods;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum Method {
    Exec = 2,
}

pub(super) fn methods() -> ActorMethods {
    ActorMethods::default().with::<ExecParams>(Method::Exec as u64, "Exec")
}

/// Creates a new actor with the given code and constructor params.
#[derive(Clone, Debug, PartialEq, Serialize_tuple, Deserialize_tuple)]
pub struct ExecParams {
    pub code_cid: Cid,
    pub constructor_params: RawBytes,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "ExecParams", rename_all = "PascalCase")]
pub struct ExecParamsJson {
    #[serde(rename = "CodeCID", with = "cid_link")]
    pub code_cid: Cid,
    #[serde(with = "raw_bytes")]
    pub constructor_params: RawBytes,
}

lotus_json_params! {
    ExecParams => ExecParamsJson,
}
