//! One-shot SHA-256 / SHA-512 digests.

use sha2::{Digest, Sha256, Sha512};

use crate::domain::crypto::{DigestBytes, HashType};
use crate::infra::error::{CryptoError, CryptoResult};

#[must_use]
pub fn sha256_digest(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(data));
    out
}

#[must_use]
pub fn sha512_digest(data: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&Sha512::digest(data));
    out
}

/// Lowercase hex SHA-256.
#[must_use]
pub fn sha256_digest_hex(data: &[u8]) -> String {
    hex::encode(sha256_digest(data))
}

/// Lowercase hex SHA-512.
#[must_use]
pub fn sha512_digest_hex(data: &[u8]) -> String {
    hex::encode(sha512_digest(data))
}

/// Typed digest for the given algorithm.
pub fn digest(hash_type: HashType, data: &[u8]) -> CryptoResult<DigestBytes> {
    let bytes = match hash_type {
        HashType::Sha256 => sha256_digest(data).to_vec(),
        HashType::Sha512 => sha512_digest(data).to_vec(),
        HashType::UnknownAlgorithm => {
            return Err(CryptoError::UnsupportedAlgorithm(format!(
                "cannot digest with {hash_type}"
            )))
        }
    };
    DigestBytes::new(hash_type, bytes).map_err(|e| CryptoError::Encoding(e.to_string()))
}
