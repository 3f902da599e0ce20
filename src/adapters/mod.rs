//! Adapter layer modules for external collaborators.
//!
//! Provides adapters for:
//! - Engine-backed private keys (hardware tokens, HSMs, in-memory engine)
//! - File input for PEM keys and certificates

pub mod engine;
pub mod fs;
