//! # Identified Key
//!
//! A player's session-scoped RSA public key, cross-signed by the session
//! server, with expiry and revision metadata. Created by the login handler
//! from wire-level key material before the holder is known; the holder is
//! bound once authentication completes; the key is then retained for the
//! life of the player's session.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use rsa::RsaPublicKey;
use uuid::Uuid;

use super::anchor::{parse_rsa_spki, session_signer};
use super::errors::KeyError;
use super::revision::{canonical_input, KeyRevision};
use super::verifier::{verify_signature, HashAlgorithm};

/// Mutable cell of an identified key: the bound holder and the memoized
/// result of self-validation. Everything else is immutable after
/// construction.
#[derive(Debug, Default)]
struct KeyCell {
    holder: Option<Uuid>,
    signature_valid: Option<bool>,
}

/// Session-server cross-signed dated RSA public key.
///
/// The key is at least 2048 bits but may be larger. The raw encoded bytes
/// are retained alongside the parsed key because the session server signs
/// the bytes as received; a re-encoding is not guaranteed byte-identical.
///
/// RSA keys do not expire; the expiry bounds the session server's signature
/// over this key, not the key itself.
#[derive(Debug)]
pub struct IdentifiedKey {
    key_bytes: Vec<u8>,
    public_key: RsaPublicKey,
    signature: Vec<u8>,
    expiry_millis: i64,
    revision: KeyRevision,
    cell: Mutex<KeyCell>,
}

impl IdentifiedKey {
    /// Construct an identified key from wire-level material.
    ///
    /// Parses `key_bytes` as a DER SubjectPublicKeyInfo RSA key. The
    /// signature is not checked here; that happens lazily on first
    /// validation, once the revision's canonicalization inputs are known.
    pub fn new(
        revision: KeyRevision,
        key_bytes: &[u8],
        expiry_millis: i64,
        signature: &[u8],
    ) -> Result<Self, KeyError> {
        let public_key = parse_rsa_spki(key_bytes)?;
        Ok(Self {
            key_bytes: key_bytes.to_vec(),
            public_key,
            signature: signature.to_vec(),
            expiry_millis,
            revision,
            cell: Mutex::new(KeyCell::default()),
        })
    }

    /// The key that signed this one: always the session server's root key,
    /// never this key's own embedded public key.
    pub fn signer(&self) -> &'static RsaPublicKey {
        session_signer()
    }

    /// The player's public key parsed from the wire bytes.
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// The raw encoded key bytes as received.
    pub fn public_key_bytes(&self) -> &[u8] {
        &self.key_bytes
    }

    /// The session server's signature over this key.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Plain keys carry no salt.
    pub fn salt(&self) -> &[u8] {
        &[]
    }

    /// Revision tag fixed at construction.
    pub fn revision(&self) -> KeyRevision {
        self.revision
    }

    /// Expiry of the session server's signature, millisecond precision.
    pub fn expiry_millis(&self) -> i64 {
        self.expiry_millis
    }

    /// Expiry as a point in time.
    pub fn expiry_temporal(&self) -> SystemTime {
        if self.expiry_millis >= 0 {
            UNIX_EPOCH + Duration::from_millis(self.expiry_millis as u64)
        } else {
            UNIX_EPOCH - Duration::from_millis(self.expiry_millis.unsigned_abs())
        }
    }

    /// The holder this key is bound to, once known.
    ///
    /// Unset until the login handler binds the authenticated player.
    pub fn holder(&self) -> Option<Uuid> {
        self.cell.lock().holder
    }

    /// Whether the session server's signature over this key is stale.
    ///
    /// Re-evaluated against the wall clock on every call and independent of
    /// [`signature_valid`](Self::signature_valid): a key can be both
    /// signature-valid and expired.
    pub fn expired(&self) -> bool {
        now_millis() > self.expiry_millis
    }

    /// Validate the session server's signature over this key.
    ///
    /// The result is memoized: the cryptographic check runs at most once per
    /// key, under the holder bound at that moment. Concurrent first callers
    /// block until the single computation finishes and observe the same
    /// result. For a holder-requiring revision queried before binding, the
    /// pending call denies; [`bind_holder`](Self::bind_holder) forces a
    /// recomputation, so the denial does not poison a later correct bind.
    ///
    /// Does not check expiry.
    pub fn signature_valid(&self) -> bool {
        let mut cell = self.cell.lock();
        self.validity_locked(&mut cell)
    }

    /// Bind the authenticated player to this key.
    ///
    /// A nil holder is always rejected without mutating state. If no holder
    /// is bound yet, the key is validated under the candidate holder; on
    /// success the holder becomes permanent and validity is cached as true,
    /// on failure nothing changes. If a holder is already bound, this
    /// returns whether the supplied holder matches the bound one and the
    /// cached signature is valid; the bound holder never changes.
    pub fn bind_holder(&self, holder: Uuid) -> bool {
        if holder.is_nil() {
            return false;
        }
        let mut cell = self.cell.lock();
        match cell.holder {
            None => {
                if !self.validate_data(Some(holder)) {
                    return false;
                }
                cell.holder = Some(holder);
                cell.signature_valid = Some(true);
                true
            }
            Some(bound) => bound == holder && self.validity_locked(&mut cell),
        }
    }

    /// Validate a signature against this key's own embedded public key.
    ///
    /// This is the primitive behind signed chat messages and commands: the
    /// signer there is the player's client, not the session server. Uses
    /// SHA-256 over the concatenation of `to_verify`.
    pub fn verify_data_signature(&self, signature: &[u8], to_verify: &[&[u8]]) -> bool {
        verify_signature(
            HashAlgorithm::Sha256,
            &self.public_key,
            signature,
            to_verify,
        )
    }

    fn validity_locked(&self, cell: &mut KeyCell) -> bool {
        if let Some(valid) = cell.signature_valid {
            return valid;
        }
        let valid = self.validate_data(cell.holder);
        cell.signature_valid = Some(valid);
        valid
    }

    fn validate_data(&self, holder: Option<Uuid>) -> bool {
        let Some(canonical) =
            canonical_input(self.revision, holder, self.expiry_millis, &self.key_bytes)
        else {
            return false;
        };
        verify_signature(
            HashAlgorithm::Sha1,
            self.signer(),
            &self.signature,
            &[&canonical],
        )
    }
}

impl PartialEq for IdentifiedKey {
    /// Two identified keys are equal iff their embedded public keys, expiry
    /// timestamps, signatures, and signers are all pairwise equal.
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        self.public_key == other.public_key
            && self.expiry_millis == other.expiry_millis
            && self.signature == other.signature
            && self.signer() == other.signer()
    }
}

impl Eq for IdentifiedKey {}

fn now_millis() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_millis() as i64,
        Err(before_epoch) => -(before_epoch.duration().as_millis() as i64),
    }
}
