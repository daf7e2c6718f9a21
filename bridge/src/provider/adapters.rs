// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The two concrete [`ProviderHandle`] adapters, selected once at
//! acquisition time.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::error::{BridgeError, BridgeResult};
use crate::provider::{EventHandler, ProviderHandle, ProviderSource};
use crate::wallet::RawWalletClient;

/// Adapter over the connection layer's wallet-client binding.
///
/// Bound clients expose a request transport only; the event half of the
/// handle contract is satisfied with recorded no-ops, which is all the
/// SDK's duck-typed contract needs from this source.
pub struct BoundClientAdapter {
    inner: Arc<dyn RawWalletClient>,
}

impl std::fmt::Debug for BoundClientAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundClientAdapter").finish_non_exhaustive()
    }
}

impl BoundClientAdapter {
    pub fn new(inner: Arc<dyn RawWalletClient>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ProviderHandle for BoundClientAdapter {
    async fn request(&self, method: &str, params: Value) -> BridgeResult<Value> {
        self.inner
            .request(method, params)
            .await
            .map_err(|e| BridgeError::ProviderError(e.to_string()))
    }

    fn on(&self, event: &str, _handler: EventHandler) {
        debug!(event, "event subscription ignored by bound wallet client");
    }

    fn remove_listener(&self, event: &str) {
        debug!(event, "event unsubscription ignored by bound wallet client");
    }

    fn source(&self) -> ProviderSource {
        ProviderSource::BoundClient
    }
}

/// Adapter over the process-global injected provider. Keeps a real
/// handler table; the embedder pumps wallet events through
/// [`InjectedProviderAdapter::dispatch`].
pub struct InjectedProviderAdapter {
    inner: Arc<dyn RawWalletClient>,
    listeners: Mutex<HashMap<String, EventHandler>>,
}

impl std::fmt::Debug for InjectedProviderAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InjectedProviderAdapter")
            .finish_non_exhaustive()
    }
}

impl InjectedProviderAdapter {
    pub fn new(inner: Arc<dyn RawWalletClient>) -> Self {
        Self {
            inner,
            listeners: Mutex::new(HashMap::new()),
        }
    }

    /// Deliver a wallet event (`accountsChanged`, `chainChanged`, ...)
    /// to the registered handler, if any.
    pub fn dispatch(&self, event: &str, payload: Value) {
        let handler = self
            .listeners
            .lock()
            .expect("listener table poisoned")
            .get(event)
            .cloned();
        match handler {
            Some(handler) => handler(payload),
            None => debug!(event, "no listener registered, event dropped"),
        }
    }
}

#[async_trait]
impl ProviderHandle for InjectedProviderAdapter {
    async fn request(&self, method: &str, params: Value) -> BridgeResult<Value> {
        self.inner
            .request(method, params)
            .await
            .map_err(|e| BridgeError::ProviderError(e.to_string()))
    }

    fn on(&self, event: &str, handler: EventHandler) {
        self.listeners
            .lock()
            .expect("listener table poisoned")
            .insert(event.to_string(), handler);
    }

    fn remove_listener(&self, event: &str) {
        self.listeners
            .lock()
            .expect("listener table poisoned")
            .remove(event);
    }

    fn source(&self) -> ProviderSource {
        ProviderSource::Injected
    }
}
