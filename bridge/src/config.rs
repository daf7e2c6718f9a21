// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::time::Duration;
use wallet_bridge_config::Config;
use wallet_bridge_types::{default_destination_chain, BridgeRequest, TokenId};

use crate::provider::ProviderPollConfig;
use crate::sdk::{NetworkMode, SdkConfig};

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_poll_max_attempts() -> u32 {
    30
}

/// Defaults a bridge-initiating control falls back on when its caller
/// prefilled nothing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Prefill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_chain_id: Option<u64>,
}

impl Prefill {
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.amount.is_none() && self.destination_chain_id.is_none()
    }

    /// Resolve into a concrete request given the wallet's current
    /// chain. Unset fields fall back to ETH, 0.1, and the
    /// chain-keyed default destination.
    pub fn resolve(&self, current_chain_id: Option<u64>) -> BridgeRequest {
        BridgeRequest {
            token: self.token.unwrap_or(TokenId::Eth),
            amount: self.amount.unwrap_or(0.1),
            destination_chain_id: self
                .destination_chain_id
                .unwrap_or_else(|| default_destination_chain(current_chain_id)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BridgeClientConfig {
    // Network mode handed to the bridging SDK
    #[serde(default)]
    pub network: NetworkMode,
    // Verbose SDK logging
    #[serde(default)]
    pub debug: bool,
    // Wallet-client polling interval
    #[serde(default = "default_poll_interval_ms")]
    pub provider_poll_interval_ms: u64,
    // Polling attempts before the last-chance check
    #[serde(default = "default_poll_max_attempts")]
    pub provider_poll_max_attempts: u32,
    #[serde(default, skip_serializing_if = "Prefill::is_empty")]
    pub prefill: Prefill,
}

impl Default for BridgeClientConfig {
    fn default() -> Self {
        Self {
            network: NetworkMode::default(),
            debug: false,
            provider_poll_interval_ms: default_poll_interval_ms(),
            provider_poll_max_attempts: default_poll_max_attempts(),
            prefill: Prefill::default(),
        }
    }
}

impl Config for BridgeClientConfig {}

impl BridgeClientConfig {
    /// Defaults with the `WALLET_BRIDGE_NETWORK` override applied.
    pub fn from_env() -> Self {
        Self {
            network: NetworkMode::from_env(),
            ..Self::default()
        }
    }

    pub fn poll_config(&self) -> ProviderPollConfig {
        ProviderPollConfig {
            interval: Duration::from_millis(self.provider_poll_interval_ms),
            max_attempts: self.provider_poll_max_attempts,
        }
    }

    pub fn sdk_config(&self) -> SdkConfig {
        SdkConfig {
            network: self.network,
            debug: self.debug,
        }
    }
}
