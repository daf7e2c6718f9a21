// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Bridging-SDK session lifecycle.
//!
//! A [`SessionManager`] is the singleton-per-process owner of the SDK
//! session: it acquires a provider handle, initializes the SDK against
//! the currently connected address exactly once, and invalidates the
//! session whenever that address changes or disappears. The composing
//! application constructs one and shares it by `Arc`; nothing else may
//! mutate session state.

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use strum_macros::Display;
use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::BridgeClientConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::metrics::BridgeMetrics;
use crate::provider::acquire_provider_handle;
use crate::sdk::{BridgeSdk, NetworkMode};
use crate::wallet::WalletConnection;
use wallet_bridge_types::{Address, ConnectionState};

/// `Uninitialized -> Initializing -> Ready`; an address change forces
/// `Ready -> Uninitialized`, a failed attempt `Initializing ->
/// Uninitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Uninitialized,
    Initializing,
    Ready,
}

/// Point-in-time summary for status surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub network: NetworkMode,
    pub connected: bool,
    pub initialized: bool,
    pub bound_address: Option<Address>,
}

#[derive(Debug, Default)]
struct SessionInner {
    initialized: bool,
    bound_address: Option<Address>,
}

pub struct SessionManager {
    sdk: Arc<dyn BridgeSdk>,
    conn: Arc<dyn WalletConnection>,
    config: BridgeClientConfig,
    metrics: Arc<BridgeMetrics>,
    // Held across a whole initialization attempt; doubles as the
    // in-flight guard for re-entrant callers.
    inner: Mutex<SessionInner>,
    state_tx: watch::Sender<SessionState>,
    cancel: CancellationToken,
}

impl SessionManager {
    pub fn new(
        sdk: Arc<dyn BridgeSdk>,
        conn: Arc<dyn WalletConnection>,
        config: BridgeClientConfig,
        metrics: Arc<BridgeMetrics>,
    ) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Uninitialized);
        Self {
            sdk,
            conn,
            config,
            metrics,
            inner: Mutex::new(SessionInner::default()),
            state_tx,
            cancel: CancellationToken::new(),
        }
    }

    pub fn sdk(&self) -> &Arc<dyn BridgeSdk> {
        &self.sdk
    }

    pub fn connection(&self) -> &Arc<dyn WalletConnection> {
        &self.conn
    }

    pub fn metrics(&self) -> &Arc<BridgeMetrics> {
        &self.metrics
    }

    pub fn network(&self) -> NetworkMode {
        self.config.network
    }

    pub fn state(&self) -> SessionState {
        *self.state_tx.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Teardown: cancels any in-flight provider polling and stops the
    /// invalidation watcher.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Guarantee the SDK is initialized against the currently connected
    /// address before returning.
    ///
    /// No-op when already bound to that address. Callers arriving while
    /// an attempt is in flight park on the session mutex and then
    /// observe the attempt's result instead of starting a second one;
    /// a stable address sees exactly one SDK `initialize`.
    pub async fn ensure_initialized(&self) -> BridgeResult<()> {
        let mut inner = self.inner.lock().await;

        // Snapshot under the guard so we bind to the address that is
        // current now, not the one current when the caller queued.
        let Some(address) = self.conn.state().connected_address() else {
            return Err(BridgeError::NotConnected);
        };

        if inner.initialized && inner.bound_address == Some(address) {
            debug!(?address, "session already initialized");
            return Ok(());
        }

        if inner.initialized {
            info!(
                previous = ?inner.bound_address,
                current = ?address,
                "connected address changed, reinitializing session"
            );
        }
        inner.initialized = false;
        inner.bound_address = None;
        self.state_tx.send_replace(SessionState::Initializing);

        let started = Instant::now();
        match self.initialize_once().await {
            Ok(()) => {
                inner.initialized = true;
                inner.bound_address = Some(address);
                self.state_tx.send_replace(SessionState::Ready);
                self.metrics.sdk_initializations.inc();
                self.metrics
                    .sdk_initialization_latency
                    .observe(started.elapsed().as_secs_f64());
                info!(?address, "bridging SDK session ready");
                Ok(())
            }
            Err(e) => {
                self.state_tx.send_replace(SessionState::Uninitialized);
                self.metrics.err_sdk_initialization.inc();
                warn!(?address, error = %e, "bridging SDK initialization failed");
                Err(e)
            }
        }
    }

    async fn initialize_once(&self) -> BridgeResult<()> {
        let poll = self.config.poll_config();
        let handle =
            acquire_provider_handle(self.conn.as_ref(), &self.cancel, &poll, &self.metrics)
                .await?;
        self.sdk
            .initialize(handle)
            .await
            .map_err(|e| BridgeError::InitializationFailure(e.to_string()))
    }

    /// Watch the wallet connection and drop the session whenever the
    /// bound address stops being the connected one. Runs until
    /// [`SessionManager::shutdown`] or until the wallet layer goes
    /// away.
    pub async fn run_invalidation(self: Arc<Self>) {
        let mut rx = self.conn.subscribe();
        let cancel = self.cancel.clone();
        info!("session invalidation watcher started");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("session invalidation watcher stopped");
                    break;
                }
                changed = rx.changed() => {
                    if changed.is_err() {
                        debug!("wallet connection closed, watcher exiting");
                        break;
                    }
                    let state = *rx.borrow_and_update();
                    self.invalidate_if_rebound(state).await;
                }
            }
        }
    }

    async fn invalidate_if_rebound(&self, state: ConnectionState) {
        let mut inner = self.inner.lock().await;
        if !inner.initialized {
            return;
        }
        let current = state.connected_address();
        if inner.bound_address != current {
            info!(
                bound = ?inner.bound_address,
                ?current,
                "wallet address changed, session invalidated"
            );
            inner.initialized = false;
            inner.bound_address = None;
            self.state_tx.send_replace(SessionState::Uninitialized);
            self.metrics.session_invalidations.inc();
        }
    }

    /// Summary for status surfaces. While an initialization attempt is
    /// in flight the bound address reads as absent.
    pub fn status(&self) -> SessionStatus {
        let bound_address = self
            .inner
            .try_lock()
            .ok()
            .and_then(|inner| inner.bound_address);
        SessionStatus {
            network: self.config.network,
            connected: self.conn.state().connected,
            initialized: self.state() == SessionState::Ready,
            bound_address,
        }
    }
}
