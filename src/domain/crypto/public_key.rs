//! Typed public key entity.
//!
//! A `PublicKey` is the unit the metadata layer hands around: an encoded key
//! value (PEM for RSA, lowercase hex for Ed25519) plus its [`KeyType`].
//! It verifies signatures and has a canonical fingerprint ([`PublicKey::key_id`])
//! that matches other Uptane implementations byte for byte.

use std::fmt;
use std::path::Path;

use base64::Engine as _;
use serde_json::{json, Value};

use super::KeyType;
use crate::adapters::fs::read_file;
use crate::infra::error::{CryptoError, CryptoResult};
use crate::services::digest::sha256_digest_hex;
use crate::services::key_identification::identify_rsa_key_type;
use crate::services::signing::{ed25519_verify, rsa_pss_verify};

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    value: String,
    key_type: KeyType,
}

impl PublicKey {
    /// Create from an explicit value and type.
    ///
    /// # Errors
    ///
    /// For RSA types the value must be a PEM public key whose modulus length
    /// matches the declared variant; otherwise returns the fatal
    /// [`CryptoError::KeyTypeMismatch`].
    pub fn new(value: impl Into<String>, key_type: KeyType) -> CryptoResult<Self> {
        let value = value.into();
        if key_type.is_rsa() {
            let actual = identify_rsa_key_type(&value);
            if actual != key_type {
                return Err(CryptoError::KeyTypeMismatch {
                    declared: key_type.to_string(),
                    actual: actual.to_string(),
                });
            }
        }
        Ok(Self { value, key_type })
    }

    /// Read a PEM RSA public key from a file. The type is derived from the
    /// modulus length and is `Unknown` if the file holds anything else.
    pub fn from_path(path: impl AsRef<Path>) -> CryptoResult<Self> {
        let value = read_file(path.as_ref())?;
        let key_type = identify_rsa_key_type(&value);
        Ok(Self { value, key_type })
    }

    /// Parse an Uptane key object (`{"keytype": .., "keyval": {"public": ..}}`).
    ///
    /// Never fails: malformed shapes and unrecognised key types produce a key
    /// of type `Unknown`.
    #[must_use]
    pub fn from_uptane_json(uptane_json: &Value) -> Self {
        let keytype = uptane_json.get("keytype").and_then(Value::as_str);
        let public = uptane_json
            .get("keyval")
            .filter(|keyval| keyval.is_object())
            .and_then(|keyval| keyval.get("public"))
            .and_then(Value::as_str);

        let (Some(keytype), Some(public)) = (keytype, public) else {
            log::debug!("Uptane key JSON has unexpected shape");
            return Self {
                value: String::new(),
                key_type: KeyType::Unknown,
            };
        };

        let key_type = match keytype.to_ascii_lowercase().as_str() {
            "ed25519" => KeyType::Ed25519,
            "rsa" => {
                let identified = identify_rsa_key_type(public);
                if identified == KeyType::Unknown {
                    log::warn!("Couldn't identify length of RSA key");
                }
                identified
            }
            _ => KeyType::Unknown,
        };

        Self {
            value: public.to_string(),
            key_type,
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Verify a raw signature over `message`. Fails closed on any problem.
    #[must_use]
    pub fn verify_signature(&self, signature: &[u8], message: &[u8]) -> bool {
        match self.key_type {
            KeyType::Ed25519 => match hex::decode(&self.value) {
                Ok(raw) => ed25519_verify(&raw, signature, message),
                Err(e) => {
                    log::error!("Ed25519 public key is not valid hex: {e}");
                    false
                }
            },
            KeyType::Rsa2048 | KeyType::Rsa3072 | KeyType::Rsa4096 => {
                rsa_pss_verify(&self.value, signature, message)
            }
            KeyType::Unknown => false,
        }
    }

    /// Verify a base64-encoded signature, as carried in Uptane metadata.
    #[must_use]
    pub fn verify_signature_base64(&self, signature_b64: &str, message: &[u8]) -> bool {
        match base64::engine::general_purpose::STANDARD.decode(signature_b64.trim()) {
            Ok(signature) => self.verify_signature(&signature, message),
            Err(e) => {
                log::error!("Signature is not valid base64: {e}");
                false
            }
        }
    }

    /// Export as an Uptane key object.
    #[must_use]
    pub fn to_uptane(&self) -> Value {
        json!({
            "keytype": self.key_type.uptane_keytype(),
            "keyval": { "public": self.value },
        })
    }

    /// Lowercase hex SHA-256 over the canonical JSON encoding of the key
    /// value, with trailing newlines stripped first.
    #[must_use]
    pub fn key_id(&self) -> String {
        let content = self.value.trim_end_matches('\n');
        sha256_digest_hex(canonical_json_string(content).as_bytes())
    }
}

/// Canonical JSON for a lone string: a quoted string with JSON escapes and
/// every non-ASCII character written as `\uXXXX` (UTF-16 code units,
/// lowercase hex), the same bytes jsoncpp's writer produces.
fn canonical_json_string(content: &str) -> String {
    let escaped = Value::String(content.to_string()).to_string();
    if escaped.is_ascii() {
        return escaped;
    }

    let mut out = String::with_capacity(escaped.len() + 8);
    let mut units = [0u16; 2];
    for c in escaped.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            for unit in c.encode_utf16(&mut units).iter() {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PublicKey(type={}, value_len={})",
            self.key_type,
            self.value.len()
        )
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} key {}", self.key_type, self.key_id())
    }
}
