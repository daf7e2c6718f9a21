// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BridgeError {
    // No wallet / address. The invoker boundary turns this into the
    // quiet `BridgeOutcome::NotConnected` instead of a user-visible error.
    #[error("wallet not connected")]
    NotConnected,
    // No wallet client became available within the polling bound
    #[error("no wallet client became available within {waited:?}")]
    ProviderTimeout { waited: Duration },
    // Provider acquisition was cancelled by component teardown
    #[error("provider acquisition cancelled")]
    Cancelled,
    // A request through an acquired provider handle failed
    #[error("provider request failed: {0}")]
    ProviderError(String),
    // The bridging SDK rejected initialization
    #[error("bridging SDK initialization failed: {0}")]
    InitializationFailure(String),
    // The bridging SDK reported failure or the call itself faulted
    #[error("bridge failed: {0}")]
    BridgeFailure(String),
}

impl BridgeError {
    /// Stable error type label for metrics.
    /// These strings are dashboard-facing and MUST remain stable.
    pub fn error_type(&self) -> &'static str {
        match self {
            BridgeError::NotConnected => "not_connected",
            BridgeError::ProviderTimeout { .. } => "provider_timeout",
            BridgeError::Cancelled => "cancelled",
            BridgeError::ProviderError(_) => "provider_error",
            BridgeError::InitializationFailure(_) => "initialization_failure",
            BridgeError::BridgeFailure(_) => "bridge_failure",
        }
    }

    /// The underlying message for user-facing surfacing, without the
    /// variant prefix. SDK verdicts pass through word for word.
    pub fn user_message(&self) -> String {
        match self {
            BridgeError::InitializationFailure(msg) | BridgeError::BridgeFailure(msg) => {
                msg.clone()
            }
            other => other.to_string(),
        }
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_type_labels_are_stable() {
        assert_eq!(BridgeError::NotConnected.error_type(), "not_connected");
        assert_eq!(
            BridgeError::ProviderTimeout {
                waited: Duration::from_secs(3)
            }
            .error_type(),
            "provider_timeout"
        );
        assert_eq!(BridgeError::Cancelled.error_type(), "cancelled");
        assert_eq!(
            BridgeError::ProviderError("x".to_string()).error_type(),
            "provider_error"
        );
        assert_eq!(
            BridgeError::InitializationFailure("x".to_string()).error_type(),
            "initialization_failure"
        );
        assert_eq!(
            BridgeError::BridgeFailure("x".to_string()).error_type(),
            "bridge_failure"
        );
    }

    #[test]
    fn test_user_message_strips_variant_prefix() {
        let err = BridgeError::BridgeFailure("no liquidity".to_string());
        assert_eq!(err.user_message(), "no liquidity");
        assert_eq!(err.to_string(), "bridge failed: no liquidity");

        let err = BridgeError::InitializationFailure("bad provider".to_string());
        assert_eq!(err.user_message(), "bad provider");

        assert_eq!(
            BridgeError::NotConnected.user_message(),
            "wallet not connected"
        );
    }
}
