//! # Signature Verifier
//!
//! Stateless PKCS#1 v1.5 verification primitive. The digest is computed over
//! the concatenation of the supplied byte spans in call order, so callers
//! must pass spans exactly as the canonicalization rule dictates.

use rsa::{Pkcs1v15Sign, RsaPublicKey};
use sha1::Sha1;
use sha2::{Digest, Sha256};

/// Digest algorithm bound into a PKCS#1 v1.5 signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    /// SHA-1, used by the session server when cross-signing player keys.
    Sha1,
    /// SHA-256, used by clients when signing chat/command payloads.
    Sha256,
}

/// Verify an RSA PKCS#1 v1.5 signature over the concatenation of `to_verify`.
///
/// Returns `false` when no spans are supplied or when verification fails for
/// any reason; malformed signatures, wrong keys, and tampered payloads all
/// collapse to the same answer.
pub fn verify_signature(
    algorithm: HashAlgorithm,
    key: &RsaPublicKey,
    signature: &[u8],
    to_verify: &[&[u8]],
) -> bool {
    if to_verify.is_empty() {
        return false;
    }
    match algorithm {
        HashAlgorithm::Sha1 => {
            let mut hasher = Sha1::new();
            for span in to_verify {
                hasher.update(span);
            }
            key.verify(Pkcs1v15Sign::new::<Sha1>(), &hasher.finalize(), signature)
                .is_ok()
        }
        HashAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            for span in to_verify {
                hasher.update(span);
            }
            key.verify(Pkcs1v15Sign::new::<Sha256>(), &hasher.finalize(), signature)
                .is_ok()
        }
    }
}
