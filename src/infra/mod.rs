//! Infrastructure layer for cross-cutting concerns.
//!
//! Provides:
//! - Error handling and result types
//! - Provisioning configuration loading and validation
//! - One-time OpenSSL runtime initialization

pub mod config;
pub mod error;
pub mod runtime;
