//! # Trust Anchor
//!
//! The session server's root RSA public key. Every identified key presented
//! by a client is cross-signed by this key, so it is the unconditional root
//! of all identified-key verification.
//!
//! The key material is embedded at build time and parsed at most once into a
//! process-wide handle. A malformed embedded key indicates a build or
//! packaging defect, not a runtime condition, and aborts the process on first
//! access.

use std::sync::OnceLock;

use rsa::pkcs8::{spki, DecodePublicKey};
use rsa::RsaPublicKey;

use super::errors::KeyError;

/// DER-encoded SubjectPublicKeyInfo of the session server's root key.
static SESSION_PUBKEY_DER: &[u8] = include_bytes!("../../yggdrasil_session_pubkey.der");

static SESSION_SIGNER: OnceLock<RsaPublicKey> = OnceLock::new();

/// The process-wide session-server public key.
///
/// Initializes from the embedded key material on first access unless
/// [`install_session_signer`] was called earlier.
///
/// # Panics
///
/// Panics if the embedded key material is not a valid RSA
/// SubjectPublicKeyInfo encoding.
pub fn session_signer() -> &'static RsaPublicKey {
    SESSION_SIGNER.get_or_init(|| {
        parse_rsa_spki(SESSION_PUBKEY_DER)
            .expect("embedded session server key must be a valid RSA SubjectPublicKeyInfo")
    })
}

/// Install an alternative session signer before any verification occurs.
///
/// Intended for embedding processes that trust a different session server,
/// and for test harnesses that hold the matching private key. Fails once the
/// process-wide handle is initialized, whether by an earlier install or by a
/// first call to [`session_signer`].
pub fn install_session_signer(der: &[u8]) -> Result<(), KeyError> {
    let key = parse_rsa_spki(der)?;
    SESSION_SIGNER
        .set(key)
        .map_err(|_| KeyError::SignerAlreadyInstalled)
}

/// Parse a DER SubjectPublicKeyInfo as an RSA public key.
///
/// Distinguishes undecodable bytes from well-formed keys of the wrong
/// algorithm so the login handler can report the two conditions separately.
pub(crate) fn parse_rsa_spki(der: &[u8]) -> Result<RsaPublicKey, KeyError> {
    RsaPublicKey::from_public_key_der(der).map_err(|err| match err {
        spki::Error::OidUnknown { oid } => KeyError::UnsupportedKeyType {
            oid: oid.to_string(),
        },
        other => KeyError::MalformedKey(other.to_string()),
    })
}
