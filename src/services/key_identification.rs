//! Classification of PEM RSA public keys by modulus length.

use openssl::rsa::Rsa;

use crate::domain::crypto::KeyType;
use crate::infra::runtime;

/// Map a PEM (SubjectPublicKeyInfo) RSA public key to its [`KeyType`].
///
/// Unparsable input and valid keys of an unsupported length both yield
/// `Unknown`; the latter is logged as a warning.
#[must_use]
pub fn identify_rsa_key_type(public_key_pem: &str) -> KeyType {
    runtime::init();
    let rsa = match Rsa::public_key_from_pem(public_key_pem.as_bytes()) {
        Ok(rsa) => rsa,
        Err(e) => {
            log::debug!("Not a PEM RSA public key: {e}");
            return KeyType::Unknown;
        }
    };

    let key_length = rsa.size() * 8;
    match KeyType::from_rsa_bits(key_length) {
        KeyType::Unknown => {
            log::warn!("Weird key length: {key_length}");
            KeyType::Unknown
        }
        known => known,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openssl::pkey::PKey;

    fn public_pem(bits: u32) -> String {
        let pkey = PKey::from_rsa(Rsa::generate(bits).unwrap()).unwrap();
        String::from_utf8(pkey.public_key_to_pem().unwrap()).unwrap()
    }

    #[test]
    fn identifies_2048() {
        assert_eq!(identify_rsa_key_type(&public_pem(2048)), KeyType::Rsa2048);
    }

    #[test]
    fn odd_length_is_unknown() {
        assert_eq!(identify_rsa_key_type(&public_pem(1024)), KeyType::Unknown);
    }

    #[test]
    fn garbage_is_unknown() {
        assert_eq!(identify_rsa_key_type("garbage"), KeyType::Unknown);
        assert_eq!(identify_rsa_key_type(""), KeyType::Unknown);
        assert_eq!(
            identify_rsa_key_type("-----BEGIN PUBLIC KEY-----\nAAAA\n-----END PUBLIC KEY-----\n"),
            KeyType::Unknown
        );
    }
}
