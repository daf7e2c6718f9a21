// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Process-global injected provider slot.
//!
//! The browser analogue is a provider injected on the global object by
//! a wallet extension. Embedders register whatever their environment
//! injects; acquisition falls back to this slot when the connection
//! layer has not bound a client.

use once_cell::sync::Lazy;
use std::sync::{Arc, RwLock};
use tracing::info;

use crate::wallet::RawWalletClient;

static INJECTED_PROVIDER: Lazy<RwLock<Option<Arc<dyn RawWalletClient>>>> =
    Lazy::new(|| RwLock::new(None));

/// Register (or replace) the injected provider.
pub fn register(client: Arc<dyn RawWalletClient>) {
    let mut slot = INJECTED_PROVIDER
        .write()
        .expect("injected provider slot poisoned");
    let replaced = slot.replace(client).is_some();
    info!(replaced, "injected provider registered");
}

/// Remove the injected provider, if any.
pub fn clear() {
    INJECTED_PROVIDER
        .write()
        .expect("injected provider slot poisoned")
        .take();
}

/// The currently injected provider, if any.
pub fn get() -> Option<Arc<dyn RawWalletClient>> {
    INJECTED_PROVIDER
        .read()
        .expect("injected provider slot poisoned")
        .clone()
}
