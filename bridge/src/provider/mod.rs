// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Provider-handle acquisition.
//!
//! A bridging-SDK session needs an event-capable request/response handle
//! for the connected wallet. Two sources can supply one, in priority
//! order: the reactive wallet-client binding produced by the connection
//! layer, and the process-global injected provider. Acquisition polls
//! both at a fixed interval, bounded, and is cancellable by teardown.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use strum_macros::Display;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{BridgeError, BridgeResult};
use crate::metrics::BridgeMetrics;
use crate::wallet::WalletConnection;

pub mod adapters;
pub mod injected;

pub use adapters::{BoundClientAdapter, InjectedProviderAdapter};

/// Callback registered through [`ProviderHandle::on`].
pub type EventHandler = Arc<dyn Fn(Value) + Send + Sync>;

/// Which source supplied a handle. Used as a metrics label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ProviderSource {
    BoundClient,
    Injected,
}

/// The normalized, event-capable contract handed to the bridging SDK,
/// regardless of which underlying source supplied the client.
#[async_trait]
pub trait ProviderHandle: std::fmt::Debug + Send + Sync {
    async fn request(&self, method: &str, params: Value) -> BridgeResult<Value>;

    /// Register an event handler. Bound wallet clients carry no event
    /// API, so their adapter records nothing; see [`adapters`].
    fn on(&self, event: &str, handler: EventHandler);

    fn remove_listener(&self, event: &str);

    fn source(&self) -> ProviderSource;
}

/// Polling knobs for [`acquire_provider_handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderPollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for ProviderPollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            max_attempts: 30,
        }
    }
}

impl ProviderPollConfig {
    /// Total time spent polling before the last-chance check.
    pub fn max_wait(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

fn handle_from_sources(conn: &dyn WalletConnection) -> Option<Arc<dyn ProviderHandle>> {
    if let Some(client) = conn.wallet_client() {
        return Some(Arc::new(BoundClientAdapter::new(client)));
    }
    if let Some(client) = injected::get() {
        return Some(Arc::new(InjectedProviderAdapter::new(client)));
    }
    None
}

/// Poll for a wallet client and wrap it in a normalized handle.
///
/// Checks the connection layer's binding first, then the injected
/// provider, once per interval up to `poll.max_attempts` times. On
/// exhaustion a last-chance direct check of the injected slot runs
/// before giving up with [`BridgeError::ProviderTimeout`]. Cancelling
/// `cancel` aborts the pending sleep and returns
/// [`BridgeError::Cancelled`].
pub async fn acquire_provider_handle(
    conn: &dyn WalletConnection,
    cancel: &CancellationToken,
    poll: &ProviderPollConfig,
    metrics: &BridgeMetrics,
) -> BridgeResult<Arc<dyn ProviderHandle>> {
    for attempt in 0..poll.max_attempts {
        metrics.provider_poll_attempts.inc();
        if let Some(handle) = handle_from_sources(conn) {
            let source = handle.source();
            metrics
                .provider_handles_acquired
                .with_label_values(&[source.to_string().as_str()])
                .inc();
            info!(attempt, %source, "wallet client acquired");
            return Ok(handle);
        }
        debug!(attempt, "no wallet client available yet");
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!(attempt, "provider polling cancelled");
                return Err(BridgeError::Cancelled);
            }
            _ = tokio::time::sleep(poll.interval) => {}
        }
    }

    // The injected provider may have shown up while we slept out the
    // final interval.
    if let Some(client) = injected::get() {
        let handle: Arc<dyn ProviderHandle> = Arc::new(InjectedProviderAdapter::new(client));
        metrics
            .provider_handles_acquired
            .with_label_values(&[handle.source().to_string().as_str()])
            .inc();
        info!("wallet client acquired via last-chance injected check");
        return Ok(handle);
    }

    let waited = poll.max_wait();
    metrics.err_provider_timeout.inc();
    warn!(?waited, "timed out waiting for a wallet client");
    Err(BridgeError::ProviderTimeout { waited })
}
