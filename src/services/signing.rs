//! Signature engine: RSA-PSS and Ed25519 sign/verify.
//!
//! RSA signatures are PKCS#1-PSS over SHA-256. The signer always uses the
//! maximum salt length for the key, while the verifier recovers the salt
//! length from the signature, so signatures from implementations that pick a
//! shorter salt still verify.
//!
//! Verification never errors: every failure path logs and returns `false`.

use ed25519_dalek::{Signer as _, Verifier as _};
use openssl::hash::MessageDigest;
use openssl::pkey::PKey;
use openssl::rsa::Padding;
use openssl::sign::{RsaPssSaltlen, Signer, Verifier};

use crate::adapters::engine::KeyEngine;
use crate::domain::crypto::{HashType, KeyType};
use crate::infra::error::{CryptoError, CryptoResult};
use crate::infra::runtime;
use crate::services::digest::digest;

pub const ED25519_PUBLIC_KEY_LENGTH: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;
pub const ED25519_SECRET_KEY_LENGTH: usize = ed25519_dalek::SECRET_KEY_LENGTH;
pub const ED25519_KEYPAIR_LENGTH: usize = ed25519_dalek::KEYPAIR_LENGTH;
pub const ED25519_SIGNATURE_LENGTH: usize = ed25519_dalek::SIGNATURE_LENGTH;

/// OpenSSL's "recover salt length from the signature" marker for PSS verification.
fn salt_len_recovered() -> RsaPssSaltlen {
    RsaPssSaltlen::custom(-2)
}

/// Sign `message`, returning an empty vector on failure (already logged).
///
/// Callers must treat an empty signature as a hard failure; use [`try_sign`]
/// to get the underlying error instead.
///
/// * Ed25519: `private_key` is hex, either the 64-byte keypair or a 32-byte seed.
/// * RSA: with `engine`, `private_key` is the engine key id; otherwise it is a
///   PEM private key.
/// * `Unknown`: always fails, even when `private_key` is a usable RSA key of
///   an unsupported size (e.g. 1024 bits).
#[must_use]
pub fn sign(
    key_type: KeyType,
    engine: Option<&dyn KeyEngine>,
    private_key: &str,
    message: &[u8],
) -> Vec<u8> {
    match try_sign(key_type, engine, private_key, message) {
        Ok(signature) => signature,
        Err(e) => {
            log::error!("Signing with {key_type} key failed: {e}");
            Vec::new()
        }
    }
}

/// Sign `message` and report failures as errors.
pub fn try_sign(
    key_type: KeyType,
    engine: Option<&dyn KeyEngine>,
    private_key: &str,
    message: &[u8],
) -> CryptoResult<Vec<u8>> {
    match key_type {
        KeyType::Ed25519 => {
            let raw = hex::decode(private_key.trim())?;
            ed25519_sign(&raw, message)
        }
        KeyType::Rsa2048 | KeyType::Rsa3072 | KeyType::Rsa4096 => match engine {
            Some(engine) => rsa_pss_sign_with_engine(engine, private_key, message),
            None => rsa_pss_sign(private_key, message),
        },
        KeyType::Unknown => Err(CryptoError::UnsupportedAlgorithm(
            "cannot sign with a key of unknown type".to_string(),
        )),
    }
}

/// Detached Ed25519 signature (deterministic).
pub fn ed25519_sign(private_key: &[u8], message: &[u8]) -> CryptoResult<Vec<u8>> {
    let signing_key = match private_key.len() {
        ED25519_KEYPAIR_LENGTH => {
            let mut keypair = [0u8; ED25519_KEYPAIR_LENGTH];
            keypair.copy_from_slice(private_key);
            ed25519_dalek::SigningKey::from_keypair_bytes(&keypair)
                .map_err(|e| CryptoError::InvalidKey(format!("Ed25519 keypair: {e}")))?
        }
        ED25519_SECRET_KEY_LENGTH => {
            let mut seed = [0u8; ED25519_SECRET_KEY_LENGTH];
            seed.copy_from_slice(private_key);
            ed25519_dalek::SigningKey::from_bytes(&seed)
        }
        other => {
            return Err(CryptoError::InvalidKey(format!(
                "Ed25519 private key must be {ED25519_KEYPAIR_LENGTH} or \
                 {ED25519_SECRET_KEY_LENGTH} bytes, got {other}"
            )))
        }
    };
    Ok(signing_key.sign(message).to_bytes().to_vec())
}

/// RSA-PSS/SHA-256 signature with maximum salt length from a PEM private key.
pub fn rsa_pss_sign(private_key_pem: &str, message: &[u8]) -> CryptoResult<Vec<u8>> {
    runtime::init();
    let key = PKey::private_key_from_pem(private_key_pem.as_bytes()).map_err(|e| {
        log::error!("PEM_read_bio_PrivateKey failed with error {e}");
        CryptoError::InvalidKey(format!("Failed to parse private key: {e}"))
    })?;
    key.rsa()
        .map_err(|e| CryptoError::InvalidKey(format!("Not an RSA private key: {e}")))?;

    let mut signer = Signer::new(MessageDigest::sha256(), &key)?;
    signer.set_rsa_padding(Padding::PKCS1_PSS)?;
    signer.set_rsa_pss_saltlen(RsaPssSaltlen::MAXIMUM_LENGTH)?;
    signer.update(message)?;
    signer.sign_to_vec().map_err(|e| {
        log::error!("RSA-PSS signing failed with error {e}");
        CryptoError::Signature(e.to_string())
    })
}

/// RSA-PSS/SHA-256 signature by an engine-held key. Only the digest and the
/// signature cross the engine boundary.
pub fn rsa_pss_sign_with_engine(
    engine: &dyn KeyEngine,
    key_id: &str,
    message: &[u8],
) -> CryptoResult<Vec<u8>> {
    let message_digest = digest(HashType::Sha256, message)?;
    engine.sign_digest(key_id, &message_digest).map_err(|e| {
        log::error!(
            "Engine '{}' failed to sign with key '{key_id}': {e}",
            engine.engine_id()
        );
        e
    })
}

/// Verify an RSA-PSS/SHA-256 signature, recovering the salt length.
#[must_use]
pub fn rsa_pss_verify(public_key_pem: &str, signature: &[u8], message: &[u8]) -> bool {
    runtime::init();
    let key = match PKey::public_key_from_pem(public_key_pem.as_bytes()) {
        Ok(key) => key,
        Err(e) => {
            log::error!("PEM_read_bio_RSA_PUBKEY failed with error {e}");
            return false;
        }
    };
    if let Err(e) = key.rsa() {
        log::error!("Public key is not RSA: {e}");
        return false;
    }

    let verify = || -> Result<bool, openssl::error::ErrorStack> {
        let mut verifier = Verifier::new(MessageDigest::sha256(), &key)?;
        verifier.set_rsa_padding(Padding::PKCS1_PSS)?;
        verifier.set_rsa_pss_saltlen(salt_len_recovered())?;
        verifier.update(message)?;
        verifier.verify(signature)
    };

    match verify() {
        Ok(valid) => valid,
        Err(e) => {
            log::error!("RSA-PSS verification failed with error {e}");
            false
        }
    }
}

/// Verify a detached Ed25519 signature.
///
/// Inputs shorter than the Ed25519 key or signature length fail immediately;
/// longer inputs are truncated to those lengths.
#[must_use]
pub fn ed25519_verify(public_key: &[u8], signature: &[u8], message: &[u8]) -> bool {
    if public_key.len() < ED25519_PUBLIC_KEY_LENGTH || signature.len() < ED25519_SIGNATURE_LENGTH
    {
        return false;
    }

    let mut key_bytes = [0u8; ED25519_PUBLIC_KEY_LENGTH];
    key_bytes.copy_from_slice(&public_key[..ED25519_PUBLIC_KEY_LENGTH]);
    let mut sig_bytes = [0u8; ED25519_SIGNATURE_LENGTH];
    sig_bytes.copy_from_slice(&signature[..ED25519_SIGNATURE_LENGTH]);

    let verifying_key = match ed25519_dalek::VerifyingKey::from_bytes(&key_bytes) {
        Ok(key) => key,
        Err(e) => {
            log::error!("Invalid Ed25519 public key: {e}");
            return false;
        }
    };
    let signature = ed25519_dalek::Signature::from_bytes(&sig_bytes);
    verifying_key.verify(message, &signature).is_ok()
}
