//! # Key Errors
//!
//! Error types for identified-key construction and trust-anchor installation.
//!
//! Only construction-time decode problems are true errors; every validity
//! question in this subsystem is a boolean predicate, since the caller's only
//! action on failure is to deny or disconnect.

use thiserror::Error;

/// Errors that can occur while decoding player key material.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The key bytes do not parse as a SubjectPublicKeyInfo structure.
    #[error("failed to decode public key: {0}")]
    MalformedKey(String),

    /// The key bytes parsed, but the algorithm is not RSA.
    #[error("expected an RSA public key, got algorithm {oid}")]
    UnsupportedKeyType {
        /// Object identifier of the algorithm actually present.
        oid: String,
    },

    /// The process-wide session signer was already initialized.
    #[error("session signer already installed")]
    SignerAlreadyInstalled,
}
