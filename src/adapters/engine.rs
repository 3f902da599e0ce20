//! Key engine trait for engine/hardware-backed RSA private keys.
//!
//! An engine holds private keys addressed by an identifier (slot, label, URI)
//! and only ever hands back signatures. The signature engine digests the
//! message and asks the engine for an RSA-PSS signature over that digest.

use std::collections::HashMap;

use openssl::md::Md;
use openssl::pkey::{PKey, Private};
use openssl::pkey_ctx::PkeyCtx;
use openssl::rsa::Padding;
use openssl::sign::RsaPssSaltlen;

use crate::domain::crypto::{DigestBytes, HashType};
use crate::infra::error::{CryptoError, CryptoResult};
use crate::infra::runtime;

/// Engine-backed private key operations.
pub trait KeyEngine: Send + Sync {
    /// Engine identifier, used in diagnostics.
    fn engine_id(&self) -> &str;

    /// Sign a SHA-256 digest with the key identified by `key_id`.
    ///
    /// Implementations must apply PKCS#1-PSS padding with SHA-256 as both
    /// the message and MGF1 digest, and the maximum salt length for the key.
    ///
    /// # Errors
    ///
    /// Returns error if the key cannot be loaded or the signing fails.
    fn sign_digest(&self, key_id: &str, digest: &DigestBytes) -> CryptoResult<Vec<u8>>;

    /// PEM public key matching `key_id`.
    ///
    /// # Errors
    ///
    /// Returns error if the key is not present in the engine.
    fn public_key_pem(&self, key_id: &str) -> CryptoResult<String>;
}

/// In-process engine holding RSA private keys in OpenSSL key objects.
#[derive(Default)]
pub struct SoftwareEngine {
    keys: HashMap<String, PKey<Private>>,
}

impl SoftwareEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a PEM private key under `key_id`, replacing any previous key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] if the PEM is not an RSA private key.
    pub fn load_pem(&mut self, key_id: impl Into<String>, private_key_pem: &str) -> CryptoResult<()> {
        runtime::init();
        let key = PKey::private_key_from_pem(private_key_pem.as_bytes()).map_err(|e| {
            log::error!("PEM_read_bio_PrivateKey failed with error {e}");
            CryptoError::InvalidKey(format!("Failed to parse private key: {e}"))
        })?;
        key.rsa()
            .map_err(|e| CryptoError::InvalidKey(format!("Engine only holds RSA keys: {e}")))?;
        self.keys.insert(key_id.into(), key);
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, key_id: &str) -> bool {
        self.keys.contains_key(key_id)
    }

    fn key(&self, key_id: &str) -> CryptoResult<&PKey<Private>> {
        self.keys
            .get(key_id)
            .ok_or_else(|| CryptoError::Engine(format!("No key '{key_id}' in software engine")))
    }
}

impl KeyEngine for SoftwareEngine {
    fn engine_id(&self) -> &str {
        "software"
    }

    fn sign_digest(&self, key_id: &str, digest: &DigestBytes) -> CryptoResult<Vec<u8>> {
        if digest.algorithm() != HashType::Sha256 {
            return Err(CryptoError::UnsupportedAlgorithm(format!(
                "engine signs SHA-256 digests only, got {}",
                digest.algorithm()
            )));
        }
        let key = self.key(key_id)?;

        let mut ctx = PkeyCtx::new(key)?;
        ctx.sign_init()?;
        ctx.set_rsa_padding(Padding::PKCS1_PSS)?;
        ctx.set_signature_md(Md::sha256())?;
        ctx.set_rsa_pss_saltlen(RsaPssSaltlen::MAXIMUM_LENGTH)?;

        let mut signature = Vec::new();
        ctx.sign_to_vec(digest.as_slice(), &mut signature)?;
        Ok(signature)
    }

    fn public_key_pem(&self, key_id: &str) -> CryptoResult<String> {
        let pem = self.key(key_id)?.public_key_to_pem()?;
        String::from_utf8(pem).map_err(|e| CryptoError::Encoding(e.to_string()))
    }
}

impl std::fmt::Debug for SoftwareEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftwareEngine")
            .field("keys", &self.keys.keys().collect::<Vec<_>>())
            .finish()
    }
}
