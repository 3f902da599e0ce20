use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::infra::error::CryptoError;

/// Signing key algorithm, with the RSA modulus size folded into the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyType {
    #[serde(alias = "rsa2048")]
    Rsa2048,
    #[serde(alias = "rsa3072")]
    Rsa3072,
    #[serde(alias = "rsa4096")]
    Rsa4096,
    #[serde(alias = "ed25519")]
    Ed25519,
    #[serde(alias = "unknown")]
    Unknown,
}

impl KeyType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Rsa2048 => "RSA2048",
            KeyType::Rsa3072 => "RSA3072",
            KeyType::Rsa4096 => "RSA4096",
            KeyType::Ed25519 => "ED25519",
            KeyType::Unknown => "unknown",
        }
    }

    /// True for the three RSA variants.
    #[must_use]
    pub fn is_rsa(&self) -> bool {
        match self {
            KeyType::Rsa2048 | KeyType::Rsa3072 | KeyType::Rsa4096 => true,
            KeyType::Ed25519 | KeyType::Unknown => false,
        }
    }

    /// Modulus size for RSA variants.
    #[must_use]
    pub fn rsa_bits(&self) -> Option<u32> {
        match self {
            KeyType::Rsa2048 => Some(2048),
            KeyType::Rsa3072 => Some(3072),
            KeyType::Rsa4096 => Some(4096),
            KeyType::Ed25519 | KeyType::Unknown => None,
        }
    }

    /// Inverse of [`KeyType::rsa_bits`]; other sizes map to `Unknown`.
    #[must_use]
    pub fn from_rsa_bits(bits: u32) -> Self {
        match bits {
            2048 => KeyType::Rsa2048,
            3072 => KeyType::Rsa3072,
            4096 => KeyType::Rsa4096,
            _ => KeyType::Unknown,
        }
    }

    /// The `keytype` string used in Uptane key JSON.
    #[must_use]
    pub fn uptane_keytype(&self) -> &'static str {
        match self {
            KeyType::Rsa2048 | KeyType::Rsa3072 | KeyType::Rsa4096 => "RSA",
            KeyType::Ed25519 => "ED25519",
            KeyType::Unknown => "unknown",
        }
    }
}

/// Free-function form of [`KeyType::is_rsa`].
#[must_use]
pub fn is_rsa_key_type(key_type: KeyType) -> bool {
    key_type.is_rsa()
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rsa2048" => Ok(KeyType::Rsa2048),
            "rsa3072" => Ok(KeyType::Rsa3072),
            "rsa4096" => Ok(KeyType::Rsa4096),
            "ed25519" => Ok(KeyType::Ed25519),
            "unknown" => Ok(KeyType::Unknown),
            other => Err(CryptoError::UnsupportedAlgorithm(format!(
                "unrecognised key type '{other}'"
            ))),
        }
    }
}
