use std::fmt;

/// Subject and key parameters for a generated device certificate.
///
/// `country`, `state` and `organization` are optional: empty strings are left
/// out of the subject. `common_name` is mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateParams {
    pub rsa_bits: u32,
    pub validity_days: u32,
    pub country: String,
    pub state: String,
    pub organization: String,
    pub common_name: String,
}

impl CertificateParams {
    /// Parameters with only a common name, 2048-bit key and the given validity.
    #[must_use]
    pub fn new(common_name: impl Into<String>, validity_days: u32) -> Self {
        Self {
            rsa_bits: 2048,
            validity_days,
            country: String::new(),
            state: String::new(),
            organization: String::new(),
            common_name: common_name.into(),
        }
    }
}

/// PEM-serialized private key and certificate.
#[derive(Clone, PartialEq, Eq)]
pub struct CertificateMaterial {
    pub private_key_pem: String,
    pub certificate_pem: String,
}

/// PEM blobs extracted from a PKCS#12 bundle.
///
/// `certificate_pem` holds the leaf certificate followed by the full CA
/// chain; `ca_pem` holds the CA chain alone (empty when the bundle has none).
#[derive(Clone, PartialEq, Eq)]
pub struct Pkcs12Material {
    pub private_key_pem: String,
    pub certificate_pem: String,
    pub ca_pem: String,
}

impl fmt::Debug for CertificateMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CertificateMaterial(key=<redacted>, cert_len={})",
            self.certificate_pem.len()
        )
    }
}

impl fmt::Debug for Pkcs12Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pkcs12Material(key=<redacted>, cert_len={}, ca_len={})",
            self.certificate_pem.len(),
            self.ca_pem.len()
        )
    }
}
