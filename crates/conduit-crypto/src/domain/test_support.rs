//! Shared fixtures for the domain unit tests.
//!
//! The session signer is process-wide, so every test that exercises key
//! validation must route through [`session_keypair`], which installs the
//! signing half before anything touches the embedded key material.

use std::sync::OnceLock;

use rsa::pkcs8::EncodePublicKey;
use rsa::{Pkcs1v15Sign, RsaPrivateKey};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::anchor::install_session_signer;
use super::key::IdentifiedKey;
use super::revision::{canonical_input, KeyRevision};
use super::verifier::HashAlgorithm;

static SESSION_KEYPAIR: OnceLock<RsaPrivateKey> = OnceLock::new();
static CLIENT_KEYPAIR: OnceLock<RsaPrivateKey> = OnceLock::new();

/// A fixed far-future expiry (2100-01-01T00:00:00Z).
pub(crate) fn far_future_millis() -> i64 {
    4_102_444_800_000
}

/// The signing half of the session signer used across this test binary.
///
/// First use generates a 2048-bit keypair and installs its public half as
/// the process-wide session signer.
pub(crate) fn session_keypair() -> &'static RsaPrivateKey {
    SESSION_KEYPAIR.get_or_init(|| {
        let key = RsaPrivateKey::new(&mut rand::thread_rng(), 2048)
            .expect("generate session test keypair");
        let der = key
            .to_public_key()
            .to_public_key_der()
            .expect("encode session test public key");
        install_session_signer(der.as_bytes())
            .expect("session signer initialized before the test fixture");
        key
    })
}

/// The client-side keypair whose public half goes into identified keys.
pub(crate) fn client_keypair() -> &'static RsaPrivateKey {
    CLIENT_KEYPAIR
        .get_or_init(|| RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("generate client test keypair"))
}

/// DER SubjectPublicKeyInfo of the client keypair.
pub(crate) fn client_spki_der() -> Vec<u8> {
    client_keypair()
        .to_public_key()
        .to_public_key_der()
        .expect("encode client test public key")
        .into_vec()
}

/// PKCS#1 v1.5 signature over the concatenation of `spans`.
pub(crate) fn sign_spans(key: &RsaPrivateKey, algorithm: HashAlgorithm, spans: &[&[u8]]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha1 => {
            let mut hasher = Sha1::new();
            for span in spans {
                hasher.update(span);
            }
            key.sign(Pkcs1v15Sign::new::<Sha1>(), &hasher.finalize())
                .expect("sign test payload")
        }
        HashAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            for span in spans {
                hasher.update(span);
            }
            key.sign(Pkcs1v15Sign::new::<Sha256>(), &hasher.finalize())
                .expect("sign test payload")
        }
    }
}

/// Client signature over the canonical v1 payload spans.
pub(crate) fn sign_payload_v1(salt: &[u8], sender: Uuid, expiry_millis: i64, body: &str) -> Vec<u8> {
    let expiry = expiry_millis.to_string();
    sign_spans(
        client_keypair(),
        HashAlgorithm::Sha256,
        &[salt, sender.as_bytes(), expiry.as_bytes(), body.as_bytes()],
    )
}

/// A generic-revision key over the client public key, correctly cross-signed
/// by the test session signer.
pub(crate) fn signed_generic_key(expiry_millis: i64) -> IdentifiedKey {
    let session = session_keypair();
    let key_bytes = client_spki_der();
    let canonical = canonical_input(KeyRevision::GenericV1, None, expiry_millis, &key_bytes)
        .expect("generic revision needs no holder");
    let signature = sign_spans(session, HashAlgorithm::Sha1, &[&canonical]);
    IdentifiedKey::new(KeyRevision::GenericV1, &key_bytes, expiry_millis, &signature)
        .expect("construct generic test key")
}

/// A linked-revision key cross-signed for the given holder.
pub(crate) fn signed_linked_key(holder: Uuid, expiry_millis: i64) -> IdentifiedKey {
    let session = session_keypair();
    let key_bytes = client_spki_der();
    let canonical = canonical_input(KeyRevision::LinkedV2, Some(holder), expiry_millis, &key_bytes)
        .expect("holder supplied");
    let signature = sign_spans(session, HashAlgorithm::Sha1, &[&canonical]);
    IdentifiedKey::new(KeyRevision::LinkedV2, &key_bytes, expiry_millis, &signature)
        .expect("construct linked test key")
}
