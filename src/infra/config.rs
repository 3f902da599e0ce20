//! Provisioning configuration.
//!
//! Holds the key type used for new key pairs and the defaults for generated
//! device certificates. Loaded from TOML; every field has a default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::crypto::{CertificateParams, KeyType};
use crate::infra::error::{CryptoError, CryptoResult};
use crate::services::keygen::MIN_RSA_BITS;

/// Key and certificate provisioning preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisioningConfig {
    /// Key type for newly generated key pairs
    pub key_type: KeyType,

    /// Defaults for generated device certificates
    pub certificate: CertificateDefaults,
}

/// Certificate generation defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateDefaults {
    pub rsa_bits: u32,
    pub validity_days: u32,
    pub country: String,
    pub state: String,
    pub organization: String,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            key_type: KeyType::Rsa2048,
            certificate: CertificateDefaults::default(),
        }
    }
}

impl Default for CertificateDefaults {
    fn default() -> Self {
        Self {
            rsa_bits: 2048,
            validity_days: 36000,
            country: String::new(),
            state: String::new(),
            organization: String::new(),
        }
    }
}

impl CertificateDefaults {
    /// Certificate parameters for a device with the given common name.
    #[must_use]
    pub fn params_for(&self, common_name: impl Into<String>) -> CertificateParams {
        CertificateParams {
            rsa_bits: self.rsa_bits,
            validity_days: self.validity_days,
            country: self.country.clone(),
            state: self.state.clone(),
            organization: self.organization.clone(),
            common_name: common_name.into(),
        }
    }
}

impl ProvisioningConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> CryptoResult<Self> {
        let config: ProvisioningConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> CryptoResult<Self> {
        let path = path.as_ref();
        log::info!("Loading configuration from: {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            CryptoError::Configuration(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> CryptoResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CryptoError::Configuration(format!("Failed to serialize config: {e}")))
    }

    /// Validate configuration values
    pub fn validate(&self) -> CryptoResult<()> {
        if self.key_type == KeyType::Unknown {
            return Err(CryptoError::Configuration(
                "key_type must name a concrete algorithm".to_string(),
            ));
        }

        if self.certificate.rsa_bits < MIN_RSA_BITS {
            return Err(CryptoError::Configuration(format!(
                "certificate.rsa_bits must be at least {MIN_RSA_BITS}, got {}",
                self.certificate.rsa_bits
            )));
        }

        if self.certificate.validity_days == 0 {
            return Err(CryptoError::Configuration(
                "certificate.validity_days must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = ProvisioningConfig::from_toml_str("").unwrap();
        assert_eq!(config, ProvisioningConfig::default());
    }

    #[test]
    fn parses_partial_document() {
        let config = ProvisioningConfig::from_toml_str(
            r#"
            key_type = "ED25519"

            [certificate]
            validity_days = 365
            country = "US"
            "#,
        )
        .unwrap();
        assert_eq!(config.key_type, KeyType::Ed25519);
        assert_eq!(config.certificate.validity_days, 365);
        assert_eq!(config.certificate.rsa_bits, 2048);

        let params = config.certificate.params_for("device-1");
        assert_eq!(params.country, "US");
        assert_eq!(params.common_name, "device-1");
    }

    #[test]
    fn lowercase_key_type_alias() {
        let config = ProvisioningConfig::from_toml_str(r#"key_type = "rsa4096""#).unwrap();
        assert_eq!(config.key_type, KeyType::Rsa4096);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(ProvisioningConfig::from_toml_str(r#"key_type = "UNKNOWN""#).is_err());
        assert!(ProvisioningConfig::from_toml_str("[certificate]\nrsa_bits = 16").is_err());
        assert!(ProvisioningConfig::from_toml_str("[certificate]\nvalidity_days = 0").is_err());
        assert!(ProvisioningConfig::from_toml_str(r#"key_type = "dsa""#).is_err());
    }

    #[test]
    fn toml_round_trip() {
        let config = ProvisioningConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(ProvisioningConfig::from_toml_str(&text).unwrap(), config);
    }
}
