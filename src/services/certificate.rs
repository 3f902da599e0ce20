//! X.509 certificate generation, CA signing, serialization and PKCS#12
//! extraction for device provisioning.
//!
//! Lifecycle of a generated certificate:
//!
//! ```text
//! generate_cert ──► SelfSigned ───────────────┐
//!        │                                    ├──► SignedCertificate ──► serialize()
//!        └──────► PendingCaSignature ─ sign_cert
//! ```
//!
//! OpenSSL objects never leave this module except inside the typestate
//! wrappers; callers get PEM text out of [`SignedCertificate::serialize`].

use std::fmt;
use std::path::Path;

use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkcs12::Pkcs12;
use openssl::pkey::{PKey, Private};
use openssl::x509::{X509Builder, X509Name, X509NameBuilder, X509};
use rand::Rng;

use crate::adapters::fs::read_file;
use crate::domain::crypto::{CertificateMaterial, CertificateParams, Pkcs12Material};
use crate::infra::error::{CryptoError, CryptoResult};
use crate::infra::runtime;
use crate::services::keygen::generate_rsa_key;

/// Serial numbers are drawn uniformly from `[0, 2^20)`.
const SERIAL_BITS: u32 = 20;

/// A certificate with its embedded key, not yet signed.
pub struct UnsignedCertificate {
    builder: X509Builder,
    subject: X509Name,
    key: PKey<Private>,
}

/// A signed certificate with its embedded key.
pub struct SignedCertificate {
    certificate: X509,
    key: PKey<Private>,
}

/// Result of [`generate_cert`].
pub enum GeneratedCertificate {
    SelfSigned(SignedCertificate),
    PendingCaSignature(UnsignedCertificate),
}

impl GeneratedCertificate {
    /// The signed certificate, if it was self-signed.
    #[must_use]
    pub fn into_signed(self) -> Option<SignedCertificate> {
        match self {
            GeneratedCertificate::SelfSigned(cert) => Some(cert),
            GeneratedCertificate::PendingCaSignature(_) => None,
        }
    }

    /// The unsigned certificate, if it awaits a CA signature.
    #[must_use]
    pub fn into_unsigned(self) -> Option<UnsignedCertificate> {
        match self {
            GeneratedCertificate::SelfSigned(_) => None,
            GeneratedCertificate::PendingCaSignature(cert) => Some(cert),
        }
    }
}

fn cert_err(step: &str) -> impl FnOnce(openssl::error::ErrorStack) -> CryptoError + '_ {
    move |e| {
        log::error!("{step} failed: {e}");
        CryptoError::Certificate(format!("{step} failed: {e}"))
    }
}

/// Build an X.509v3 certificate with a fresh RSA key.
///
/// # Errors
///
/// Fatal [`CryptoError::MissingCommonName`] when `common_name` is empty;
/// key generation errors from [`generate_rsa_key`]; otherwise
/// [`CryptoError::Certificate`].
pub fn generate_cert(params: &CertificateParams, self_sign: bool) -> CryptoResult<GeneratedCertificate> {
    if params.common_name.is_empty() {
        return Err(CryptoError::MissingCommonName);
    }
    runtime::init();

    let mut builder = X509Builder::new().map_err(cert_err("X509_new"))?;
    builder.set_version(2).map_err(cert_err("X509_set_version"))?;

    let serial: u32 = rand::thread_rng().gen_range(0..(1u32 << SERIAL_BITS));
    let serial = BigNum::from_u32(serial)
        .and_then(|bn| bn.to_asn1_integer())
        .map_err(cert_err("ASN1_INTEGER_set"))?;
    builder
        .set_serial_number(&serial)
        .map_err(cert_err("X509_set_serialNumber"))?;

    let mut name = X509NameBuilder::new().map_err(cert_err("X509_NAME_new"))?;
    for (field, value) in [
        ("C", &params.country),
        ("ST", &params.state),
        ("O", &params.organization),
        ("CN", &params.common_name),
    ] {
        if !value.is_empty() {
            name.append_entry_by_text(field, value)
                .map_err(cert_err("X509_NAME_add_entry_by_txt"))?;
        }
    }
    let name = name.build();
    builder
        .set_subject_name(&name)
        .map_err(cert_err("X509_set_subject_name"))?;

    let key = generate_rsa_key(params.rsa_bits)?;
    builder.set_pubkey(&key).map_err(cert_err("X509_set_pubkey"))?;

    let not_before = Asn1Time::days_from_now(0).map_err(cert_err("X509_gmtime_adj"))?;
    let not_after =
        Asn1Time::days_from_now(params.validity_days).map_err(cert_err("X509_gmtime_adj"))?;
    builder
        .set_not_before(&not_before)
        .map_err(cert_err("X509_set_notBefore"))?;
    builder
        .set_not_after(&not_after)
        .map_err(cert_err("X509_set_notAfter"))?;

    let unsigned = UnsignedCertificate {
        builder,
        subject: name,
        key,
    };
    if self_sign {
        let signed = unsigned.self_sign()?;
        log::info!(
            "Successfully self-signed the generated certificate. This should not be used in production!"
        );
        Ok(GeneratedCertificate::SelfSigned(signed))
    } else {
        Ok(GeneratedCertificate::PendingCaSignature(unsigned))
    }
}

/// Sign `certificate` with a CA certificate and key read from PEM files.
///
/// # Errors
///
/// Fatal [`CryptoError::CaMaterial`] if either file cannot be read or parsed.
pub fn sign_cert(
    ca_cert_path: impl AsRef<Path>,
    ca_key_path: impl AsRef<Path>,
    certificate: UnsignedCertificate,
) -> CryptoResult<SignedCertificate> {
    runtime::init();
    let ca_cert_pem = read_file(ca_cert_path.as_ref())
        .map_err(|e| CryptoError::CaMaterial(format!("Reading CA certificate failed: {e}")))?;
    let ca_cert = X509::from_pem(ca_cert_pem.as_bytes()).map_err(|e| {
        log::error!("Reading CA certificate failed: {e}");
        CryptoError::CaMaterial(format!("Reading CA certificate failed: {e}"))
    })?;

    let ca_key_pem = read_file(ca_key_path.as_ref())
        .map_err(|e| CryptoError::CaMaterial(format!("Reading CA private key failed: {e}")))?;
    let ca_key = PKey::private_key_from_pem(ca_key_pem.as_bytes()).map_err(|e| {
        log::error!("PEM_read_bio_PrivateKey failed: {e}");
        CryptoError::CaMaterial(format!("PEM_read_bio_PrivateKey failed: {e}"))
    })?;

    certificate.sign_with(&ca_cert, &ca_key)
}

impl UnsignedCertificate {
    /// Sign with the embedded key (issuer = subject).
    pub fn self_sign(mut self) -> CryptoResult<SignedCertificate> {
        self.builder
            .set_issuer_name(&self.subject)
            .map_err(cert_err("X509_set_issuer_name"))?;
        self.builder
            .sign(&self.key, MessageDigest::sha256())
            .map_err(cert_err("X509_sign"))?;
        Ok(SignedCertificate {
            certificate: self.builder.build(),
            key: self.key,
        })
    }

    fn sign_with(mut self, ca_cert: &X509, ca_key: &PKey<Private>) -> CryptoResult<SignedCertificate> {
        self.builder
            .set_issuer_name(ca_cert.subject_name())
            .map_err(cert_err("X509_set_issuer_name"))?;
        self.builder
            .sign(ca_key, MessageDigest::sha256())
            .map_err(cert_err("X509_sign"))?;
        Ok(SignedCertificate {
            certificate: self.builder.build(),
            key: self.key,
        })
    }
}

impl SignedCertificate {
    /// PEM-encode the embedded private key (PKCS#1) and the certificate.
    pub fn serialize(&self) -> CryptoResult<CertificateMaterial> {
        let rsa = self.key.rsa().map_err(cert_err("EVP_PKEY_get1_RSA"))?;
        let private_key_pem = rsa
            .private_key_to_pem()
            .map_err(cert_err("PEM_write_RSAPrivateKey"))?;
        let certificate_pem = self
            .certificate
            .to_pem()
            .map_err(cert_err("PEM_write_bio_X509"))?;
        Ok(CertificateMaterial {
            private_key_pem: pem_to_string(private_key_pem)?,
            certificate_pem: pem_to_string(certificate_pem)?,
        })
    }

    /// Whether the certificate signature verifies under the embedded key.
    #[must_use]
    pub fn is_self_signed(&self) -> bool {
        self.certificate.verify(&self.key).unwrap_or(false)
    }
}

/// Serialize a signed certificate and its key to PEM.
pub fn serialize_cert(certificate: &SignedCertificate) -> CryptoResult<CertificateMaterial> {
    certificate.serialize()
}

/// Extract the private key, leaf certificate (followed by the CA chain) and
/// CA chain from a PKCS#12 bundle.
///
/// # Errors
///
/// Recoverable [`CryptoError::Pkcs12`] if the bundle cannot be parsed or the
/// password is wrong.
pub fn extract_from_pkcs12(bundle: &[u8], password: &str) -> CryptoResult<Pkcs12Material> {
    runtime::init();
    let pkcs12 = Pkcs12::from_der(bundle).map_err(|e| {
        log::error!("Could not read PKCS#12 bundle: {e}");
        CryptoError::Pkcs12(format!("Could not read bundle: {e}"))
    })?;
    let parsed = pkcs12.parse2(password).map_err(|e| {
        log::error!("Could not parse PKCS#12 bundle: {e}");
        CryptoError::Pkcs12(format!("Could not parse bundle: {e}"))
    })?;

    let pkey = parsed
        .pkey
        .ok_or_else(|| CryptoError::Pkcs12("bundle has no private key".to_string()))?;
    let leaf = parsed
        .cert
        .ok_or_else(|| CryptoError::Pkcs12("bundle has no certificate".to_string()))?;

    let pkcs12_err = |e: openssl::error::ErrorStack| CryptoError::Pkcs12(e.to_string());
    let private_key_pem = pem_to_string(pkey.private_key_to_pem_pkcs8().map_err(pkcs12_err)?)?;
    let mut certificate_pem = pem_to_string(leaf.to_pem().map_err(pkcs12_err)?)?;
    let mut ca_pem = String::new();
    if let Some(chain) = parsed.ca {
        for ca_cert in chain.iter() {
            let pem = pem_to_string(ca_cert.to_pem().map_err(pkcs12_err)?)?;
            ca_pem.push_str(&pem);
            certificate_pem.push_str(&pem);
        }
    }

    Ok(Pkcs12Material {
        private_key_pem,
        certificate_pem,
        ca_pem,
    })
}

/// Subject common name of a PEM certificate.
///
/// # Errors
///
/// [`CryptoError::Certificate`] if the certificate is unparsable or has no
/// common name.
pub fn extract_common_name(certificate_pem: &str) -> CryptoResult<String> {
    runtime::init();
    let certificate = X509::from_pem(certificate_pem.as_bytes())
        .map_err(|e| CryptoError::Certificate(format!("Could not parse certificate: {e}")))?;
    let entry = certificate
        .subject_name()
        .entries_by_nid(Nid::COMMONNAME)
        .next()
        .ok_or_else(|| CryptoError::Certificate("Could not get CN from certificate".to_string()))?;
    let common_name = entry
        .data()
        .to_string()
        .map_err(|e| CryptoError::Certificate(format!("Could not get CN from certificate: {e}")))?;
    if common_name.contains('\0') {
        log::error!("Certificate CN contains an embedded NUL");
        return Err(CryptoError::Certificate(
            "Certificate CN contains an embedded NUL".to_string(),
        ));
    }
    Ok(common_name)
}

fn pem_to_string(pem: Vec<u8>) -> CryptoResult<String> {
    String::from_utf8(pem).map_err(|e| CryptoError::Encoding(e.to_string()))
}

impl fmt::Debug for UnsignedCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnsignedCertificate(key_bits={})", self.key.bits())
    }
}

impl fmt::Debug for SignedCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SignedCertificate(key_bits={}, serial_len={})",
            self.key.bits(),
            self.certificate.serial_number().to_bn().map_or(0, |bn| bn.num_bytes())
        )
    }
}

impl fmt::Debug for GeneratedCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratedCertificate::SelfSigned(cert) => write!(f, "SelfSigned({cert:?})"),
            GeneratedCertificate::PendingCaSignature(cert) => {
                write!(f, "PendingCaSignature({cert:?})")
            }
        }
    }
}
