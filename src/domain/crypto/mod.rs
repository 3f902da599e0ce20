//! Foundational cryptographic domain types.
//!
//! Provides strongly-typed wrappers for cryptographic artifacts including:
//! - Key and hash algorithm enumerations
//! - Content hash values and typed digest bytes
//! - The `PublicKey` entity used for signature verification
//! - Certificate parameters and PEM material

mod cert;
mod digest_bytes;
mod hash;
mod key_type;
mod public_key;

pub use cert::{CertificateMaterial, CertificateParams, Pkcs12Material};
pub use digest_bytes::{DigestBytes, DigestBytesError};
pub use hash::{Hash, HashType};
pub use key_type::{is_rsa_key_type, KeyType};
pub use public_key::PublicKey;
