//! Incremental hashing and `Hash` generation.
//!
//! [`MultiPartHasher`] accumulates an unbounded byte stream; finalization
//! consumes the hasher so it cannot be updated afterwards. Stream hashing
//! reads in 64 KiB blocks and yields the same digest as the one-shot path.

use std::io::{ErrorKind, Read};

use sha2::{Digest, Sha256, Sha512};

use crate::domain::crypto::{Hash, HashType};
use crate::infra::error::{CryptoError, CryptoResult};
use crate::services::digest::{sha256_digest, sha512_digest};

/// Block size used when hashing a stream.
pub const STREAM_BLOCK_SIZE: usize = 64 * 1024;

/// Running SHA-256 or SHA-512 state.
///
/// Single use: the state cannot be duplicated and finalizing consumes it.
///
/// ```compile_fail
/// use uptane_crypto::{HashType, MultiPartHasher};
///
/// let hasher = MultiPartHasher::create(HashType::Sha256).unwrap();
/// let fork = hasher.clone();
/// ```
#[derive(Debug)]
pub enum MultiPartHasher {
    Sha256(Sha256),
    Sha512(Sha512),
}

impl MultiPartHasher {
    /// Create a hasher for `hash_type`, or `None` if the algorithm is not supported.
    #[must_use]
    pub fn create(hash_type: HashType) -> Option<Self> {
        match hash_type {
            HashType::Sha256 => Some(MultiPartHasher::Sha256(Sha256::new())),
            HashType::Sha512 => Some(MultiPartHasher::Sha512(Sha512::new())),
            HashType::UnknownAlgorithm => {
                log::error!("Unsupported type of hashing: {hash_type}");
                None
            }
        }
    }

    #[must_use]
    pub fn hash_type(&self) -> HashType {
        match self {
            MultiPartHasher::Sha256(_) => HashType::Sha256,
            MultiPartHasher::Sha512(_) => HashType::Sha512,
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        match self {
            MultiPartHasher::Sha256(state) => state.update(data),
            MultiPartHasher::Sha512(state) => state.update(data),
        }
    }

    /// Finalize into upper-case hex.
    #[must_use]
    pub fn into_hex_digest(self) -> String {
        match self {
            MultiPartHasher::Sha256(state) => hex::encode_upper(state.finalize()),
            MultiPartHasher::Sha512(state) => hex::encode_upper(state.finalize()),
        }
    }

    /// Finalize into a [`Hash`].
    #[must_use]
    pub fn into_hash(self) -> Hash {
        let hash_type = self.hash_type();
        Hash::new(hash_type, self.into_hex_digest())
    }
}

impl Hash {
    /// One-shot hash of `data`.
    ///
    /// # Errors
    ///
    /// [`CryptoError::UnsupportedAlgorithm`] for anything but SHA-256/SHA-512.
    pub fn generate(hash_type: HashType, data: &[u8]) -> CryptoResult<Hash> {
        let digest = match hash_type {
            HashType::Sha256 => hex::encode_upper(sha256_digest(data)),
            HashType::Sha512 => hex::encode_upper(sha512_digest(data)),
            HashType::UnknownAlgorithm => {
                return Err(CryptoError::UnsupportedAlgorithm(
                    "Unsupported hash type".to_string(),
                ))
            }
        };
        Ok(Hash::new(hash_type, digest))
    }

    /// Hash a stream to its end. Returns the hash and the number of bytes read.
    ///
    /// # Errors
    ///
    /// [`CryptoError::UnsupportedAlgorithm`] for anything but SHA-256/SHA-512,
    /// [`CryptoError::Io`] if reading fails.
    pub fn generate_from_reader<R: Read>(
        hash_type: HashType,
        mut source: R,
    ) -> CryptoResult<(Hash, u64)> {
        let Some(mut hasher) = MultiPartHasher::create(hash_type) else {
            return Err(CryptoError::UnsupportedAlgorithm(
                "Unsupported hash type".to_string(),
            ));
        };

        let mut buffer = vec![0u8; STREAM_BLOCK_SIZE];
        let mut count: u64 = 0;
        loop {
            let n = match source.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            hasher.update(&buffer[..n]);
            count += n as u64;
        }

        log::debug!("Hashed {count} bytes with {hash_type}");
        Ok((hasher.into_hash(), count))
    }
}
