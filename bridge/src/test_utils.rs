// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Scriptable mocks for the external collaborators: the raw wallet
//! transport, the bridging SDK, and the pre-built widget.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use crate::provider::ProviderHandle;
use crate::sdk::{BridgeSdk, BridgeWidget, SdkBridgeResponse};
use crate::wallet::RawWalletClient;
use wallet_bridge_types::{Address, BridgeRequest};

pub fn test_address(n: u64) -> Address {
    Address::from_low_u64_be(n)
}

/// Install a test subscriber honoring `RUST_LOG`. Safe to call from
/// every test; later calls are no-ops.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Records requested methods; optionally fails every request.
pub struct MockRawWalletClient {
    requests: Mutex<Vec<String>>,
    failure: Mutex<Option<String>>,
}

impl MockRawWalletClient {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(vec![]),
            failure: Mutex::new(None),
        }
    }

    pub fn fail_requests_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RawWalletClient for MockRawWalletClient {
    async fn request(&self, method: &str, _params: Value) -> anyhow::Result<Value> {
        self.requests.lock().unwrap().push(method.to_string());
        if let Some(message) = self.failure.lock().unwrap().clone() {
            anyhow::bail!(message);
        }
        Ok(Value::Null)
    }
}

/// What the mock SDK / widget does when `bridge` is called.
#[derive(Debug, Clone)]
pub enum BridgeBehavior {
    /// `success: true` with the given explorer URL
    Succeed { explorer_url: Option<String> },
    /// `success: false` with the given message
    ReportFailure { error: Option<String> },
    /// The call itself faults
    Fault { message: String },
}

impl BridgeBehavior {
    fn into_result(self) -> anyhow::Result<SdkBridgeResponse> {
        match self {
            BridgeBehavior::Succeed { explorer_url } => Ok(SdkBridgeResponse {
                success: true,
                explorer_url,
                error: None,
            }),
            BridgeBehavior::ReportFailure { error } => Ok(SdkBridgeResponse {
                success: false,
                explorer_url: None,
                error,
            }),
            BridgeBehavior::Fault { message } => Err(anyhow::anyhow!(message)),
        }
    }
}

/// Scriptable [`BridgeSdk`] with call counters.
pub struct MockSdk {
    init_calls: AtomicUsize,
    bridge_calls: AtomicUsize,
    init_delay: Mutex<Duration>,
    init_failure: Mutex<Option<String>>,
    bridge_behavior: Mutex<BridgeBehavior>,
    bridge_gate: Mutex<Option<Arc<Notify>>>,
    last_request: Mutex<Option<BridgeRequest>>,
}

impl MockSdk {
    pub fn new() -> Self {
        Self {
            init_calls: AtomicUsize::new(0),
            bridge_calls: AtomicUsize::new(0),
            init_delay: Mutex::new(Duration::ZERO),
            init_failure: Mutex::new(None),
            bridge_behavior: Mutex::new(BridgeBehavior::Succeed { explorer_url: None }),
            bridge_gate: Mutex::new(None),
            last_request: Mutex::new(None),
        }
    }

    pub fn last_request(&self) -> Option<BridgeRequest> {
        *self.last_request.lock().unwrap()
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn bridge_calls(&self) -> usize {
        self.bridge_calls.load(Ordering::SeqCst)
    }

    pub fn set_init_delay(&self, delay: Duration) {
        *self.init_delay.lock().unwrap() = delay;
    }

    pub fn fail_initialize_with(&self, message: &str) {
        *self.init_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn clear_initialize_failure(&self) {
        *self.init_failure.lock().unwrap() = None;
    }

    pub fn set_bridge_behavior(&self, behavior: BridgeBehavior) {
        *self.bridge_behavior.lock().unwrap() = behavior;
    }

    /// Make `bridge` park until the returned [`Notify`] is notified.
    pub fn gate_bridge(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.bridge_gate.lock().unwrap() = Some(gate.clone());
        gate
    }
}

#[async_trait]
impl BridgeSdk for MockSdk {
    async fn initialize(&self, _provider: Arc<dyn ProviderHandle>) -> anyhow::Result<()> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.init_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = self.init_failure.lock().unwrap().clone() {
            anyhow::bail!(message);
        }
        Ok(())
    }

    async fn bridge(&self, request: &BridgeRequest) -> anyhow::Result<SdkBridgeResponse> {
        self.bridge_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(*request);
        let gate = self.bridge_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let behavior = self.bridge_behavior.lock().unwrap().clone();
        behavior.into_result()
    }
}

/// Scriptable [`BridgeWidget`] with a call counter.
pub struct MockWidget {
    bridge_calls: AtomicUsize,
    behavior: Mutex<BridgeBehavior>,
}

impl MockWidget {
    pub fn new() -> Self {
        Self {
            bridge_calls: AtomicUsize::new(0),
            behavior: Mutex::new(BridgeBehavior::Succeed { explorer_url: None }),
        }
    }

    pub fn bridge_calls(&self) -> usize {
        self.bridge_calls.load(Ordering::SeqCst)
    }

    pub fn set_behavior(&self, behavior: BridgeBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }
}

#[async_trait]
impl BridgeWidget for MockWidget {
    async fn bridge(&self, _request: &BridgeRequest) -> anyhow::Result<SdkBridgeResponse> {
        self.bridge_calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self.behavior.lock().unwrap().clone();
        behavior.into_result()
    }
}
