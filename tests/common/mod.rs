//! Shared helpers for integration tests.
//!
//! RSA key generation is slow, so each key size is generated once per test
//! binary and cached.

#![allow(dead_code)]

use std::sync::OnceLock;

use uptane_crypto::{generate_key_pair, KeyPair, KeyType};

/// Install a test logger once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn cached(cell: &'static OnceLock<KeyPair>, key_type: KeyType) -> &'static KeyPair {
    cell.get_or_init(|| generate_key_pair(key_type).expect("key generation"))
}

/// Cached key pair for `key_type` (RSA variants and Ed25519).
pub fn key_pair(key_type: KeyType) -> &'static KeyPair {
    static RSA2048: OnceLock<KeyPair> = OnceLock::new();
    static RSA3072: OnceLock<KeyPair> = OnceLock::new();
    static RSA4096: OnceLock<KeyPair> = OnceLock::new();
    static ED25519: OnceLock<KeyPair> = OnceLock::new();
    match key_type {
        KeyType::Rsa2048 => cached(&RSA2048, key_type),
        KeyType::Rsa3072 => cached(&RSA3072, key_type),
        KeyType::Rsa4096 => cached(&RSA4096, key_type),
        KeyType::Ed25519 => cached(&ED25519, key_type),
        KeyType::Unknown => panic!("no fixture for unknown key type"),
    }
}

pub const ALL_KEY_TYPES: [KeyType; 4] = [
    KeyType::Rsa2048,
    KeyType::Rsa3072,
    KeyType::Rsa4096,
    KeyType::Ed25519,
];
