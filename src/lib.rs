//! Uptane crypto library
//!
//! Signing, verification and key identity for Uptane metadata, plus the
//! X.509/PKCS#12 handling used for device provisioning.
//!
//! - RSA-PSS (2048/3072/4096) and Ed25519 signatures, software or engine-backed keys
//! - `PublicKey` with canonical key ids compatible with other Uptane implementations
//! - One-shot and streaming SHA-256/SHA-512 content hashes
//! - Certificate generation, CA signing and PKCS#12 extraction

pub mod adapters;
pub mod domain;
pub mod infra;
pub mod services;

pub use adapters::engine::{KeyEngine, SoftwareEngine};
pub use domain::crypto::{
    is_rsa_key_type, CertificateMaterial, CertificateParams, DigestBytes, DigestBytesError, Hash,
    HashType, KeyType, Pkcs12Material, PublicKey,
};
pub use infra::config::{CertificateDefaults, ProvisioningConfig};
pub use infra::error::{CryptoError, CryptoResult, Severity};
pub use infra::runtime::{init, teardown};
pub use services::{
    extract_common_name, extract_from_pkcs12, generate_cert, generate_key_pair,
    identify_rsa_key_type, serialize_cert, sign, sign_cert, try_sign, GeneratedCertificate,
    KeyPair, MultiPartHasher, SignedCertificate, UnsignedCertificate,
};
