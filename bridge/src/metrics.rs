// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

use prometheus::{
    register_histogram_with_registry, register_int_counter_vec_with_registry,
    register_int_counter_with_registry, Histogram, IntCounter, IntCounterVec, Registry,
};

const INIT_LATENCY_SEC_BUCKETS: &[f64] = &[
    0.01, 0.05, 0.1, 0.2, 0.3, 0.5, 0.7, 1.0, 1.5, 2.0, 3.0, 5.0, 10.0, 20.0, 30.0,
];

#[derive(Clone, Debug)]
pub struct BridgeMetrics {
    pub(crate) provider_poll_attempts: IntCounter,
    pub(crate) provider_handles_acquired: IntCounterVec,
    pub(crate) err_provider_timeout: IntCounter,

    pub(crate) sdk_initializations: IntCounter,
    pub(crate) err_sdk_initialization: IntCounter,
    pub(crate) sdk_initialization_latency: Histogram,
    pub(crate) session_invalidations: IntCounter,

    pub(crate) bridge_requests: IntCounter,
    pub(crate) bridge_ok: IntCounter,
    pub(crate) err_bridge: IntCounterVec,
    pub(crate) bridge_skipped_not_connected: IntCounter,
}

impl BridgeMetrics {
    pub fn new(registry: &Registry) -> Self {
        Self {
            provider_poll_attempts: register_int_counter_with_registry!(
                "bridge_provider_poll_attempts",
                "Total number of wallet-client polling attempts",
                registry,
            )
            .unwrap(),
            provider_handles_acquired: register_int_counter_vec_with_registry!(
                "bridge_provider_handles_acquired",
                "Total number of provider handles acquired, by source",
                &["source"],
                registry,
            )
            .unwrap(),
            err_provider_timeout: register_int_counter_with_registry!(
                "bridge_err_provider_timeout",
                "Total number of wallet-client acquisition timeouts",
                registry,
            )
            .unwrap(),
            sdk_initializations: register_int_counter_with_registry!(
                "bridge_sdk_initializations",
                "Total number of successful bridging SDK initializations",
                registry,
            )
            .unwrap(),
            err_sdk_initialization: register_int_counter_with_registry!(
                "bridge_err_sdk_initialization",
                "Total number of failed bridging SDK initializations",
                registry,
            )
            .unwrap(),
            sdk_initialization_latency: register_histogram_with_registry!(
                "bridge_sdk_initialization_latency",
                "Latency of bridging SDK initialization in seconds",
                INIT_LATENCY_SEC_BUCKETS.to_vec(),
                registry,
            )
            .unwrap(),
            session_invalidations: register_int_counter_with_registry!(
                "bridge_session_invalidations",
                "Total number of sessions invalidated by wallet address changes",
                registry,
            )
            .unwrap(),
            bridge_requests: register_int_counter_with_registry!(
                "bridge_requests",
                "Total number of bridge invocations dispatched to the SDK",
                registry,
            )
            .unwrap(),
            bridge_ok: register_int_counter_with_registry!(
                "bridge_requests_ok",
                "Total number of bridge invocations the SDK reported successful",
                registry,
            )
            .unwrap(),
            err_bridge: register_int_counter_vec_with_registry!(
                "bridge_err_requests",
                "Total number of failed bridge invocations, by error type",
                &["error_type"],
                registry,
            )
            .unwrap(),
            bridge_skipped_not_connected: register_int_counter_with_registry!(
                "bridge_skipped_not_connected",
                "Total number of bridge clicks ignored because no wallet was connected",
                registry,
            )
            .unwrap(),
        }
    }

    pub fn new_for_testing() -> Self {
        let registry = Registry::new();
        Self::new(&registry)
    }
}
