// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Contracts for the external wallet-connection layer.
//!
//! The wallet layer owns connection state (connected flag, address,
//! chain id) and may bind a raw wallet client once one is available.
//! This crate only observes both; it never mutates them.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use wallet_bridge_types::{Address, ConnectionState};

/// Raw request transport a wallet-connection layer binds. This is the
/// un-normalized shape; [`crate::provider::ProviderHandle`] is what the
/// bridging SDK actually receives.
#[async_trait]
pub trait RawWalletClient: Send + Sync {
    /// Submit a JSON-RPC style request (`eth_accounts`,
    /// `eth_sendTransaction`, ...) on behalf of the connected account.
    async fn request(&self, method: &str, params: Value) -> anyhow::Result<Value>;
}

/// Read-only view of the wallet-connection layer.
pub trait WalletConnection: Send + Sync {
    /// Current connection snapshot.
    fn state(&self) -> ConnectionState;

    /// Reactive view of the snapshot. Fires on every state change;
    /// the session invalidation watcher lives on this.
    fn subscribe(&self) -> watch::Receiver<ConnectionState>;

    /// The reactive wallet-client binding, when the connection layer
    /// has produced one. Checked ahead of the injected provider during
    /// acquisition.
    fn wallet_client(&self) -> Option<Arc<dyn RawWalletClient>>;
}

/// Watch-backed [`WalletConnection`] an embedder drives from its wallet
/// layer's callbacks.
pub struct WalletConnectionBinding {
    state_tx: watch::Sender<ConnectionState>,
    client_tx: watch::Sender<Option<Arc<dyn RawWalletClient>>>,
}

impl WalletConnectionBinding {
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(ConnectionState::disconnected());
        let (client_tx, _) = watch::channel(None);
        Self {
            state_tx,
            client_tx,
        }
    }

    pub fn set_connected(&self, address: Address, chain_id: u64) {
        self.state_tx
            .send_replace(ConnectionState::connected(address, chain_id));
    }

    pub fn set_disconnected(&self) {
        self.state_tx.send_replace(ConnectionState::disconnected());
        self.client_tx.send_replace(None);
    }

    pub fn bind_client(&self, client: Arc<dyn RawWalletClient>) {
        self.client_tx.send_replace(Some(client));
    }

    pub fn clear_client(&self) {
        self.client_tx.send_replace(None);
    }
}

impl Default for WalletConnectionBinding {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletConnection for WalletConnectionBinding {
    fn state(&self) -> ConnectionState {
        *self.state_tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state_tx.subscribe()
    }

    fn wallet_client(&self) -> Option<Arc<dyn RawWalletClient>> {
        self.client_tx.borrow().clone()
    }
}
