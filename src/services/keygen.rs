//! Key-pair generation.

use std::fmt;

use openssl::bn::BigNum;
use openssl::pkey::{PKey, Private};
use openssl::rsa::Rsa;
use rand::RngCore;

use crate::domain::crypto::KeyType;
use crate::infra::error::{CryptoError, CryptoResult};
use crate::infra::runtime;

/// Smallest modulus OpenSSL's parameter checks accept.
pub const MIN_RSA_BITS: u32 = 31;

/// Standard public exponent (F4).
const RSA_F4: u32 = 0x10001;

/// Encoded key pair. RSA halves are PEM (SubjectPublicKeyInfo / PKCS#1),
/// Ed25519 halves are lowercase hex (32-byte public key, 64-byte keypair).
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub key_type: KeyType,
    pub public_key: String,
    pub private_key: String,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("key_type", &self.key_type)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Generate a key pair of the given type.
///
/// # Errors
///
/// `Unknown` is rejected with [`CryptoError::UnsupportedAlgorithm`]; RSA
/// generation reports the errors of [`generate_rsa_key`].
pub fn generate_key_pair(key_type: KeyType) -> CryptoResult<KeyPair> {
    match key_type {
        KeyType::Ed25519 => Ok(generate_ed25519_key_pair()),
        KeyType::Rsa2048 | KeyType::Rsa3072 | KeyType::Rsa4096 => {
            let bits = key_type.rsa_bits().unwrap_or(2048);
            generate_rsa_key_pair(key_type, bits)
        }
        KeyType::Unknown => Err(CryptoError::UnsupportedAlgorithm(
            "cannot generate a key pair of unknown type".to_string(),
        )),
    }
}

fn generate_ed25519_key_pair() -> KeyPair {
    let mut seed = [0u8; ed25519_dalek::SECRET_KEY_LENGTH];
    rand::rngs::OsRng.fill_bytes(&mut seed);
    let signing_key = ed25519_dalek::SigningKey::from_bytes(&seed);
    KeyPair {
        key_type: KeyType::Ed25519,
        public_key: hex::encode(signing_key.verifying_key().as_bytes()),
        private_key: hex::encode(signing_key.to_keypair_bytes()),
    }
}

fn generate_rsa_key_pair(key_type: KeyType, bits: u32) -> CryptoResult<KeyPair> {
    let pkey = generate_rsa_key(bits)?;
    let public_key = pkey.public_key_to_pem().map_err(|e| {
        log::error!("PEM_write_bio_PUBKEY failed: {e}");
        CryptoError::KeyGeneration(e.to_string())
    })?;
    let private_key = pkey.rsa()?.private_key_to_pem().map_err(|e| {
        log::error!("PEM_write_bio_RSAPrivateKey failed: {e}");
        CryptoError::KeyGeneration(e.to_string())
    })?;
    Ok(KeyPair {
        key_type,
        public_key: pem_to_string(public_key)?,
        private_key: pem_to_string(private_key)?,
    })
}

/// Generate an RSA key with exponent 65537.
///
/// # Errors
///
/// Fatal [`CryptoError::InvalidKeySize`] below [`MIN_RSA_BITS`], fatal
/// [`CryptoError::InsufficientEntropy`] if the RNG cannot be seeded.
pub(crate) fn generate_rsa_key(bits: u32) -> CryptoResult<PKey<Private>> {
    if bits < MIN_RSA_BITS {
        return Err(CryptoError::InvalidKeySize(bits));
    }
    runtime::init();
    ensure_seeded_rng()?;

    let exponent = BigNum::from_u32(RSA_F4)
        .map_err(|e| CryptoError::KeyGeneration(format!("BN_set_word failed: {e}")))?;
    let rsa = Rsa::generate_with_e(bits, &exponent).map_err(|e| {
        log::error!("RSA_generate_key_ex failed: {e}");
        CryptoError::KeyGeneration(format!("RSA_generate_key_ex failed: {e}"))
    })?;
    PKey::from_rsa(rsa)
        .map_err(|e| CryptoError::KeyGeneration(format!("EVP_PKEY_assign_RSA failed: {e}")))
}

/// Draw from the OpenSSL RNG; failure means it could not be seeded.
fn ensure_seeded_rng() -> CryptoResult<()> {
    let mut probe = [0u8; 32];
    openssl::rand::rand_bytes(&mut probe).map_err(|e| {
        log::error!("Random generator has not been sufficiently seeded: {e}");
        CryptoError::InsufficientEntropy(e.to_string())
    })
}

fn pem_to_string(pem: Vec<u8>) -> CryptoResult<String> {
    String::from_utf8(pem).map_err(|e| CryptoError::Encoding(e.to_string()))
}
