//! Process-wide OpenSSL initialization.
//!
//! [`init`] runs exactly once per process no matter how many times it is
//! called; every public operation that touches OpenSSL calls it first.
//! Against OpenSSL 3 it also loads the `legacy` and `default` providers so
//! RC2/3DES-protected PKCS#12 bundles stay readable.

use std::sync::Once;

static INIT: Once = Once::new();

#[cfg(openssl3)]
static PROVIDERS: std::sync::Mutex<Vec<openssl::provider::Provider>> =
    std::sync::Mutex::new(Vec::new());

/// Initialize the OpenSSL library and, on OpenSSL 3, its providers.
pub fn init() {
    INIT.call_once(|| {
        openssl::init();
        #[cfg(openssl3)]
        load_providers();
        log::debug!("OpenSSL initialized: {}", openssl::version::version());
    });
}

/// Unload providers loaded by [`init`]. Only meant for process shutdown.
pub fn teardown() {
    #[cfg(openssl3)]
    {
        let mut providers = PROVIDERS
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let count = providers.len();
        providers.clear();
        log::debug!("Unloaded {count} OpenSSL provider(s)");
    }
}

#[cfg(openssl3)]
fn load_providers() {
    let mut providers = PROVIDERS
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    for name in ["legacy", "default"] {
        match openssl::provider::Provider::try_load(None, name, true) {
            Ok(provider) => providers.push(provider),
            Err(e) => log::warn!("Could not load '{name}' OpenSSL provider: {e}"),
        }
    }
}
