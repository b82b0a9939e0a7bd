//! # Key Revision Policy
//!
//! Revision-dependent canonicalization of the bytes the session server signs
//! when it cross-signs a player key. The canonical input must be produced
//! byte-exactly or verification fails against legitimate clients.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Revision tag attached to every identified key at construction.
///
/// The revision of a key never changes; it selects which bytes are hashed
/// when validating the session server's signature and whether a bound holder
/// is part of the signed material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyRevision {
    /// First revision: the key is signed standalone, holder not covered.
    GenericV1,
    /// Linked revision: the signed material starts with the holder identity,
    /// binding the key to one player.
    LinkedV2,
}

impl KeyRevision {
    /// Whether the canonicalization rule covers the holder identity.
    pub fn requires_holder(self) -> bool {
        matches!(self, KeyRevision::LinkedV2)
    }
}

/// Build the canonical signed input for a key under the given revision.
///
/// Returns `None` when the revision requires a holder and none is bound;
/// validation of such a key denies until a holder arrives.
///
/// - `GenericV1`: millisecond expiry as decimal text, then the PEM armoring
///   of the raw key bytes.
/// - `LinkedV2`: first 8 holder bytes, last 8 holder bytes, millisecond
///   expiry as decimal text, then the raw key bytes.
pub(crate) fn canonical_input(
    revision: KeyRevision,
    holder: Option<Uuid>,
    expiry_millis: i64,
    key_bytes: &[u8],
) -> Option<Vec<u8>> {
    let expiry = expiry_millis.to_string();
    match revision {
        KeyRevision::GenericV1 => {
            let pem = pem_encode_key(key_bytes, "RSA PUBLIC KEY");
            let mut out = Vec::with_capacity(expiry.len() + pem.len());
            out.extend_from_slice(expiry.as_bytes());
            out.extend_from_slice(pem.as_bytes());
            Some(out)
        }
        KeyRevision::LinkedV2 => {
            let holder = holder?;
            let id = holder.as_bytes();
            let mut out = Vec::with_capacity(id.len() + expiry.len() + key_bytes.len());
            out.extend_from_slice(&id[..8]);
            out.extend_from_slice(&id[8..]);
            out.extend_from_slice(expiry.as_bytes());
            out.extend_from_slice(key_bytes);
            Some(out)
        }
    }
}

/// PEM-armor raw key bytes under the given label.
///
/// Standard-alphabet padded base64, hard-wrapped at 76 characters per line,
/// with `BEGIN`/`END` markers and a trailing newline. The output feeds the
/// `GenericV1` digest, so it must stay byte-stable.
pub fn pem_encode_key(key: &[u8], label: &str) -> String {
    let encoded = BASE64.encode(key);
    let mut body = String::with_capacity(encoded.len() + encoded.len() / 76 + 1);
    // Base64 output is ASCII, so byte offsets are char boundaries.
    let mut rest = encoded.as_str();
    while rest.len() > 76 {
        let (line, tail) = rest.split_at(76);
        body.push_str(line);
        body.push('\n');
        rest = tail;
    }
    body.push_str(rest);
    format!("-----BEGIN {label}-----\n{body}\n-----END {label}-----\n")
}
