// Copyright 2025 Recall Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use std::future::Future;

use courier_provider::NodeClient;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{Error, Result};
use crate::registry::MethodRegistry;

/// Message sending and parameter encoding on top of a [`NodeClient`] session.
///
/// The session is owned for the lifetime of the value and released by
/// [`Services::close`]. Operations after close fail with [`Error::SessionClosed`].
#[derive(Debug)]
pub struct Services<C> {
    client: Option<C>,
    pub(crate) registry: MethodRegistry,
}

impl<C: NodeClient> Services<C> {
    /// Create services over `client`, resolving method params with `registry`.
    pub fn new(client: C, registry: MethodRegistry) -> Self {
        Self {
            client: Some(client),
            registry,
        }
    }

    /// Ends the session, releasing the client.
    ///
    /// Closing twice is an error.
    pub fn close(&mut self) -> Result<()> {
        match self.client.take() {
            Some(client) => {
                drop(client);
                debug!("services closed");
                Ok(())
            }
            None => Err(Error::SessionClosed),
        }
    }

    /// Returns whether [`Services::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.client.is_none()
    }

    pub(crate) fn client(&self) -> Result<&C> {
        self.client.as_ref().ok_or(Error::SessionClosed)
    }
}

/// Runs a node round-trip unless `ctx` is cancelled first.
///
/// Node errors are wrapped with `wrap`. Cancellation drops the in-flight request;
/// whatever the node already did with it stands.
pub(crate) async fn call<T, F>(
    ctx: &CancellationToken,
    fut: F,
    wrap: impl FnOnce(anyhow::Error) -> Error,
) -> Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    tokio::select! {
        biased;
        _ = ctx.cancelled() => Err(Error::Cancelled),
        res = fut => res.map_err(wrap),
    }
}
