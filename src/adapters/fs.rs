//! File input for keys and CA material.

use std::fs;
use std::path::Path;

use crate::infra::error::{CryptoError, CryptoResult};

/// Read a text file (PEM key or certificate).
pub fn read_file(path: &Path) -> CryptoResult<String> {
    fs::read_to_string(path).map_err(|e| {
        log::error!("Failed to read {}: {e}", path.display());
        CryptoError::Io(format!("Failed to read {}: {e}", path.display()))
    })
}
