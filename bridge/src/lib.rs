// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Wallet-facing session and invocation layer for a third-party
//! cross-chain bridging SDK.
//!
//! The [`session::SessionManager`] acquires a provider handle from
//! whichever wallet source is available and initializes the SDK
//! exactly once per connected address; the [`invoker`] controls expose
//! the `{on_click, is_loading}` contract a presentation layer consumes.
//! The SDK itself, the wallet-connection layer, and all presentation
//! are external and reached only through the contracts in [`sdk`] and
//! [`wallet`].

pub mod config;
pub mod error;
pub mod invoker;
pub mod metrics;
pub mod provider;
pub mod sdk;
pub mod session;
pub mod wallet;

#[cfg(test)]
pub mod test_utils;

pub use error::{BridgeError, BridgeResult};
pub use invoker::{BridgeControl, SessionBridgeInvoker, WidgetBridgeInvoker};
pub use session::{SessionManager, SessionState, SessionStatus};

#[cfg(test)]
mod tests {
    use crate::config::BridgeClientConfig;
    use crate::invoker::{BridgeControl, SessionBridgeInvoker};
    use crate::metrics::BridgeMetrics;
    use crate::session::{SessionManager, SessionState};
    use crate::test_utils::{test_address, MockRawWalletClient, MockSdk};
    use crate::wallet::WalletConnectionBinding;
    use std::sync::Arc;
    use wallet_bridge_types::SEPOLIA_CHAIN_ID;

    /// Full wiring: connect, bridge, switch accounts, bridge again.
    #[tokio::test]
    async fn test_end_to_end_account_switch_flow() {
        crate::test_utils::init_test_logging();

        let sdk = Arc::new(MockSdk::new());
        let binding = Arc::new(WalletConnectionBinding::new());
        let session = Arc::new(SessionManager::new(
            sdk.clone(),
            binding.clone(),
            BridgeClientConfig::default(),
            Arc::new(BridgeMetrics::new_for_testing()),
        ));
        let watcher = tokio::spawn(session.clone().run_invalidation());
        let invoker = SessionBridgeInvoker::new(session.clone(), Default::default());

        // Click before connecting: quiet no-op
        assert!(invoker.on_click().await.is_not_connected());
        assert_eq!(sdk.init_calls(), 0);

        binding.set_connected(test_address(1), SEPOLIA_CHAIN_ID);
        binding.bind_client(Arc::new(MockRawWalletClient::new()));
        assert!(invoker.on_click().await.is_success());
        assert_eq!(sdk.init_calls(), 1);
        assert_eq!(sdk.bridge_calls(), 1);

        // Second click reuses the session
        assert!(invoker.on_click().await.is_success());
        assert_eq!(sdk.init_calls(), 1);

        // Account switch invalidates and the next click reinitializes
        let mut state_rx = session.subscribe_state();
        binding.set_connected(test_address(2), SEPOLIA_CHAIN_ID);
        state_rx.changed().await.unwrap();
        assert_eq!(*state_rx.borrow_and_update(), SessionState::Uninitialized);

        assert!(invoker.on_click().await.is_success());
        assert_eq!(sdk.init_calls(), 2);
        assert_eq!(sdk.bridge_calls(), 3);

        session.shutdown();
        watcher.await.unwrap();
    }
}
