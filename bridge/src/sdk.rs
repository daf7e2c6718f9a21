// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Contracts for the third-party bridging SDK.
//!
//! The SDK owns all on-chain transaction logic, routing, fee
//! computation, and explorer-URL generation. This crate only drives
//! its two entry points: `initialize` against an acquired provider
//! handle, and `bridge` with a token/amount/destination tuple.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use strum_macros::Display;

use crate::provider::ProviderHandle;
use wallet_bridge_types::BridgeRequest;

/// Environment variable selecting the network mode.
pub const NETWORK_ENV_VAR: &str = "WALLET_BRIDGE_NETWORK";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NetworkMode {
    Mainnet,
    #[default]
    Testnet,
}

impl FromStr for NetworkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(NetworkMode::Mainnet),
            "testnet" => Ok(NetworkMode::Testnet),
            other => Err(format!("unknown network mode: {other}")),
        }
    }
}

impl NetworkMode {
    /// Mode from `WALLET_BRIDGE_NETWORK`, defaulting to testnet when
    /// unset or unparseable.
    pub fn from_env() -> Self {
        std::env::var(NETWORK_ENV_VAR)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}

/// Construction-time SDK configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkConfig {
    pub network: NetworkMode,
    pub debug: bool,
}

impl SdkConfig {
    pub fn new(network: NetworkMode) -> Self {
        Self {
            network,
            debug: false,
        }
    }

    pub fn from_env() -> Self {
        Self::new(NetworkMode::from_env())
    }
}

/// The SDK's own verdict on a bridge call, passed through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkBridgeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The bridging SDK's public contract. Faults are opaque third-party
/// errors; the session and invoker layers decide what they mean.
#[async_trait]
pub trait BridgeSdk: Send + Sync {
    /// Bind the SDK to a wallet. Must complete before any bridge call.
    async fn initialize(&self, provider: Arc<dyn ProviderHandle>) -> anyhow::Result<()>;

    /// Execute one bridge operation.
    async fn bridge(&self, request: &BridgeRequest) -> anyhow::Result<SdkBridgeResponse>;
}

/// A pre-built bridging widget. Unlike [`BridgeSdk`], a widget owns its
/// session handling; callers hand it requests and nothing else.
#[async_trait]
pub trait BridgeWidget: Send + Sync {
    async fn bridge(&self, request: &BridgeRequest) -> anyhow::Result<SdkBridgeResponse>;
}
