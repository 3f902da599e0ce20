//! Service layer module root.
//! Contains digesting, signing, key and certificate operations.

pub mod certificate;
pub mod digest;
pub mod hasher;
pub mod key_identification;
pub mod keygen;
pub mod signing;

pub use certificate::{
    extract_common_name, extract_from_pkcs12, generate_cert, serialize_cert, sign_cert,
    GeneratedCertificate, SignedCertificate, UnsignedCertificate,
};
pub use digest::{digest, sha256_digest, sha256_digest_hex, sha512_digest, sha512_digest_hex};
pub use hasher::{MultiPartHasher, STREAM_BLOCK_SIZE};
pub use key_identification::identify_rsa_key_type;
pub use keygen::{generate_key_pair, KeyPair, MIN_RSA_BITS};
pub use signing::{ed25519_sign, ed25519_verify, rsa_pss_sign, rsa_pss_verify, sign, try_sign};
