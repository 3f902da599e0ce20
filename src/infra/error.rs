//! Error types for signing, key and certificate operations.
//!
//! Verification never produces a `CryptoError`; it fails closed with `false`.
//! Everything else reports through [`CryptoError`], and each variant knows
//! whether the caller may recover from it in place (see [`Severity`]).

use thiserror::Error;

/// Result type for crypto operations
pub type CryptoResult<T> = Result<T, CryptoError>;

/// How a failure is expected to be handled by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The caller decides what to do next (retry, fall back, report).
    Recoverable,
    /// A precondition was violated; the current operation must be aborted.
    Fatal,
}

/// Error types for crypto operations
#[derive(Error, Debug, miette::Diagnostic)]
pub enum CryptoError {
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("RSA key length mismatch: declared {declared}, actual {actual}")]
    KeyTypeMismatch { declared: String, actual: String },

    #[error("RSA key size can't be smaller than 31 bits (requested {0})")]
    InvalidKeySize(u32),

    #[error("Random generator has not been sufficiently seeded: {0}")]
    InsufficientEntropy(String),

    #[error("Key generation error: {0}")]
    KeyGeneration(String),

    #[error("Signature creation error: {0}")]
    Signature(String),

    #[error("Key engine error: {0}")]
    Engine(String),

    #[error("Certificate error: {0}")]
    Certificate(String),

    #[error("Certificate common name is mandatory")]
    MissingCommonName,

    #[error("CA material error: {0}")]
    CaMaterial(String),

    #[error("PKCS#12 error: {0}")]
    Pkcs12(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("OpenSSL error: {0}")]
    OpenSsl(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CryptoError {
    /// Failure tier of this error.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            CryptoError::KeyTypeMismatch { .. }
            | CryptoError::InvalidKeySize(_)
            | CryptoError::InsufficientEntropy(_)
            | CryptoError::MissingCommonName
            | CryptoError::CaMaterial(_) => Severity::Fatal,
            CryptoError::UnsupportedAlgorithm(_)
            | CryptoError::InvalidKey(_)
            | CryptoError::KeyGeneration(_)
            | CryptoError::Signature(_)
            | CryptoError::Engine(_)
            | CryptoError::Certificate(_)
            | CryptoError::Pkcs12(_)
            | CryptoError::Encoding(_)
            | CryptoError::OpenSsl(_)
            | CryptoError::Io(_)
            | CryptoError::Configuration(_) => Severity::Recoverable,
        }
    }

    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl From<openssl::error::ErrorStack> for CryptoError {
    fn from(error: openssl::error::ErrorStack) -> Self {
        CryptoError::OpenSsl(error.to_string())
    }
}

impl From<std::io::Error> for CryptoError {
    fn from(error: std::io::Error) -> Self {
        CryptoError::Io(error.to_string())
    }
}

impl From<hex::FromHexError> for CryptoError {
    fn from(error: hex::FromHexError) -> Self {
        CryptoError::Encoding(format!("invalid hex: {error}"))
    }
}

impl From<base64::DecodeError> for CryptoError {
    fn from(error: base64::DecodeError) -> Self {
        CryptoError::Encoding(format!("invalid base64: {error}"))
    }
}

impl From<serde_json::Error> for CryptoError {
    fn from(error: serde_json::Error) -> Self {
        CryptoError::Encoding(format!("JSON: {error}"))
    }
}

impl From<toml::de::Error> for CryptoError {
    fn from(error: toml::de::Error) -> Self {
        CryptoError::Configuration(error.to_string())
    }
}
