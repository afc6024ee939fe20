// Copyright 2025 Recall Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

//! # Courier SDK
//!
//! Builds, funds-checks, sequences and pushes messages, and encodes JSON
//! method params for the target actor.

pub mod builtin;
mod codec;
pub mod error;
pub mod registry;
mod send;
mod services;

pub use error::{Error, Result};
pub use registry::MethodRegistry;
pub use send::{total_cost, Nonce, SendParams};
pub use services::Services;
