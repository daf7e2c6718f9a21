// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Shared domain types for the wallet-facing bridge client.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::Display;

pub use ethers::types::Address;

/// Ethereum Sepolia testnet
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;
/// Base Sepolia testnet
pub const BASE_SEPOLIA_CHAIN_ID: u64 = 84532;
/// Polygon mainnet
pub const POLYGON_CHAIN_ID: u64 = 137;

/// Tokens the bridging SDK accepts. Wire form is the upper-case symbol.
#[derive(
    Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash, Display,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum TokenId {
    Eth,
    Usdc,
    Usdt,
}

impl TokenId {
    pub fn symbol(&self) -> &'static str {
        match self {
            TokenId::Eth => "ETH",
            TokenId::Usdc => "USDC",
            TokenId::Usdt => "USDT",
        }
    }
}

impl FromStr for TokenId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ETH" => Ok(TokenId::Eth),
            "USDC" => Ok(TokenId::Usdc),
            "USDT" => Ok(TokenId::Usdt),
            other => Err(format!("unknown token symbol: {other}")),
        }
    }
}

/// Wallet connection snapshot, owned by the external wallet layer.
/// An address change (or disappearance) is the sole trigger for
/// session invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConnectionState {
    pub connected: bool,
    pub address: Option<Address>,
    pub chain_id: Option<u64>,
}

impl ConnectionState {
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn connected(address: Address, chain_id: u64) -> Self {
        Self {
            connected: true,
            address: Some(address),
            chain_id: Some(chain_id),
        }
    }

    /// The address, but only while the wallet reports itself connected.
    pub fn connected_address(&self) -> Option<Address> {
        if self.connected {
            self.address
        } else {
            None
        }
    }
}

/// A single bridge invocation. Transient, never persisted.
///
/// The amount is in the bridging SDK's own decimal surface; conversion
/// to on-chain units is the SDK's business.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeRequest {
    pub token: TokenId,
    pub amount: f64,
    pub destination_chain_id: u64,
}

impl BridgeRequest {
    pub fn new(token: TokenId, amount: f64, destination_chain_id: u64) -> Self {
        Self {
            token,
            amount,
            destination_chain_id,
        }
    }
}

/// Destination used when a request carries no explicit target chain:
/// wallets sitting on Sepolia (or an unknown chain) bridge to Base
/// Sepolia, everything else goes to Polygon.
pub fn default_destination_chain(current_chain_id: Option<u64>) -> u64 {
    match current_chain_id {
        Some(SEPOLIA_CHAIN_ID) | None => BASE_SEPOLIA_CHAIN_ID,
        Some(_) => POLYGON_CHAIN_ID,
    }
}

/// What a bridge-initiating control reports back to its caller.
///
/// `NotConnected` is the quiet no-op path: nothing reached the SDK and
/// nothing is surfaced to the user beyond a log line. The other two
/// variants carry the SDK's own verdict through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum BridgeOutcome {
    NotConnected,
    Bridged {
        #[serde(skip_serializing_if = "Option::is_none")]
        explorer_url: Option<String>,
    },
    Failed {
        error: String,
    },
}

impl BridgeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BridgeOutcome::Bridged { .. })
    }

    pub fn is_not_connected(&self) -> bool {
        matches!(self, BridgeOutcome::NotConnected)
    }

    pub fn explorer_url(&self) -> Option<&str> {
        match self {
            BridgeOutcome::Bridged { explorer_url } => explorer_url.as_deref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            BridgeOutcome::Failed { error } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_symbol_forms() {
        assert_eq!(TokenId::Eth.to_string(), "ETH");
        assert_eq!("usdc".parse::<TokenId>().unwrap(), TokenId::Usdc);
        assert_eq!("USDT".parse::<TokenId>().unwrap(), TokenId::Usdt);
        assert!("DOGE".parse::<TokenId>().is_err());

        // Wire form is the symbol, not the variant name
        assert_eq!(serde_json::to_string(&TokenId::Eth).unwrap(), "\"ETH\"");
    }

    #[test]
    fn test_default_destination_chain() {
        assert_eq!(
            default_destination_chain(Some(SEPOLIA_CHAIN_ID)),
            BASE_SEPOLIA_CHAIN_ID
        );
        // Unknown chain is treated as Sepolia
        assert_eq!(default_destination_chain(None), BASE_SEPOLIA_CHAIN_ID);
        assert_eq!(default_destination_chain(Some(1)), POLYGON_CHAIN_ID);
        assert_eq!(
            default_destination_chain(Some(BASE_SEPOLIA_CHAIN_ID)),
            POLYGON_CHAIN_ID
        );
    }

    #[test]
    fn test_connected_address_requires_connected_flag() {
        let addr = Address::from_low_u64_be(7);
        let state = ConnectionState {
            connected: false,
            address: Some(addr),
            chain_id: Some(SEPOLIA_CHAIN_ID),
        };
        assert_eq!(state.connected_address(), None);
        assert_eq!(
            ConnectionState::connected(addr, SEPOLIA_CHAIN_ID).connected_address(),
            Some(addr)
        );
    }

    #[test]
    fn test_outcome_helpers() {
        let ok = BridgeOutcome::Bridged {
            explorer_url: Some("https://x".to_string()),
        };
        assert!(ok.is_success());
        assert_eq!(ok.explorer_url(), Some("https://x"));
        assert_eq!(ok.error(), None);

        let failed = BridgeOutcome::Failed {
            error: "no liquidity".to_string(),
        };
        assert!(!failed.is_success());
        assert_eq!(failed.error(), Some("no liquidity"));

        assert!(BridgeOutcome::NotConnected.is_not_connected());
        assert!(!BridgeOutcome::NotConnected.is_success());
    }
}
