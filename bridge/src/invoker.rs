// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Bridge-initiating controls.
//!
//! Two invokers share one external contract, [`BridgeControl`]: the
//! session-driven one performs the manual acquisition/initialization
//! sequence, the widget-driven one delegates session handling to a
//! pre-built widget. A presentation caller cannot tell them apart.
//!
//! This is the fault boundary of the crate: whatever goes wrong below
//! it comes back as a [`BridgeOutcome`], never as an escaped fault.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::Prefill;
use crate::error::{BridgeError, BridgeResult};
use crate::metrics::BridgeMetrics;
use crate::sdk::{BridgeWidget, SdkBridgeResponse};
use crate::session::SessionManager;
use crate::wallet::WalletConnection;
use wallet_bridge_types::{BridgeOutcome, BridgeRequest};

/// The `{on_click, is_loading}` contract exposed to presentation.
#[async_trait]
pub trait BridgeControl: Send + Sync {
    /// Run one bridge attempt with the control's prefill defaults.
    async fn on_click(&self) -> BridgeOutcome;

    /// True exactly while an invocation is in flight.
    fn is_loading(&self) -> bool;
}

fn outcome_from_result(
    metrics: &BridgeMetrics,
    result: BridgeResult<SdkBridgeResponse>,
) -> BridgeOutcome {
    match result {
        Ok(response) if response.success => {
            metrics.bridge_ok.inc();
            info!(explorer_url = ?response.explorer_url, "bridge succeeded");
            BridgeOutcome::Bridged {
                explorer_url: response.explorer_url,
            }
        }
        Ok(response) => {
            let error = response
                .error
                .unwrap_or_else(|| "unknown bridge error".to_string());
            metrics.err_bridge.with_label_values(&["bridge_failure"]).inc();
            warn!(%error, "bridging SDK reported failure");
            BridgeOutcome::Failed { error }
        }
        Err(e) => {
            metrics.err_bridge.with_label_values(&[e.error_type()]).inc();
            warn!(error = %e, "bridge attempt failed");
            BridgeOutcome::Failed {
                error: e.user_message(),
            }
        }
    }
}

/// Manual path: ensure the session is initialized, then dispatch the
/// request through the SDK.
pub struct SessionBridgeInvoker {
    session: Arc<SessionManager>,
    prefill: Prefill,
    loading: AtomicBool,
}

impl SessionBridgeInvoker {
    pub fn new(session: Arc<SessionManager>, prefill: Prefill) -> Self {
        Self {
            session,
            prefill,
            loading: AtomicBool::new(false),
        }
    }

    pub async fn invoke(&self, request: &BridgeRequest) -> BridgeOutcome {
        let metrics = self.session.metrics().clone();
        let Some(address) = self.session.connection().state().connected_address() else {
            debug!("bridge click ignored, wallet not connected");
            metrics.bridge_skipped_not_connected.inc();
            return BridgeOutcome::NotConnected;
        };

        self.loading.store(true, Ordering::SeqCst);
        metrics.bridge_requests.inc();
        info!(
            ?address,
            token = %request.token,
            amount = request.amount,
            destination_chain_id = request.destination_chain_id,
            "dispatching bridge"
        );
        let result = self.bridge_via_session(request).await;
        self.loading.store(false, Ordering::SeqCst);
        outcome_from_result(&metrics, result)
    }

    async fn bridge_via_session(
        &self,
        request: &BridgeRequest,
    ) -> BridgeResult<SdkBridgeResponse> {
        self.session.ensure_initialized().await?;
        self.session
            .sdk()
            .bridge(request)
            .await
            .map_err(|e| BridgeError::BridgeFailure(e.to_string()))
    }
}

#[async_trait]
impl BridgeControl for SessionBridgeInvoker {
    async fn on_click(&self) -> BridgeOutcome {
        let request = self
            .prefill
            .resolve(self.session.connection().state().chain_id);
        self.invoke(&request).await
    }

    fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }
}

/// Widget path: the pre-built widget owns acquisition and
/// initialization; only the precondition and the fault boundary live
/// here.
pub struct WidgetBridgeInvoker {
    widget: Arc<dyn BridgeWidget>,
    conn: Arc<dyn WalletConnection>,
    prefill: Prefill,
    metrics: Arc<BridgeMetrics>,
    loading: AtomicBool,
}

impl WidgetBridgeInvoker {
    pub fn new(
        widget: Arc<dyn BridgeWidget>,
        conn: Arc<dyn WalletConnection>,
        prefill: Prefill,
        metrics: Arc<BridgeMetrics>,
    ) -> Self {
        Self {
            widget,
            conn,
            prefill,
            metrics,
            loading: AtomicBool::new(false),
        }
    }

    pub async fn invoke(&self, request: &BridgeRequest) -> BridgeOutcome {
        let Some(address) = self.conn.state().connected_address() else {
            debug!("widget bridge click ignored, wallet not connected");
            self.metrics.bridge_skipped_not_connected.inc();
            return BridgeOutcome::NotConnected;
        };

        self.loading.store(true, Ordering::SeqCst);
        self.metrics.bridge_requests.inc();
        info!(?address, token = %request.token, "delegating bridge to widget");
        let result = self
            .widget
            .bridge(request)
            .await
            .map_err(|e| BridgeError::BridgeFailure(e.to_string()));
        self.loading.store(false, Ordering::SeqCst);
        outcome_from_result(&self.metrics, result)
    }
}

#[async_trait]
impl BridgeControl for WidgetBridgeInvoker {
    async fn on_click(&self) -> BridgeOutcome {
        let request = self.prefill.resolve(self.conn.state().chain_id);
        self.invoke(&request).await
    }

    fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }
}
