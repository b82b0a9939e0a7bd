//! # Integration Tests
//!
//! Flows through the public API of `conduit-crypto`, the way the login and
//! play handlers drive it. Fixtures sign with a generated session keypair
//! installed as the process-wide signer before first use.

pub mod chat_flow;

use std::sync::OnceLock;

use conduit_crypto::{install_session_signer, HashAlgorithm};
use rsa::pkcs8::EncodePublicKey;
use rsa::{Pkcs1v15Sign, RsaPrivateKey};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// The two sides of every fixture: the session server that cross-signs
/// player keys, and the client that signs chat payloads.
pub struct TestIdentity {
    pub session: RsaPrivateKey,
    pub client: RsaPrivateKey,
}

static IDENTITY: OnceLock<TestIdentity> = OnceLock::new();

/// Process-wide fixture keypairs; installs the session signer on first use.
pub fn identity() -> &'static TestIdentity {
    IDENTITY.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();

        let mut rng = rand::thread_rng();
        let session = RsaPrivateKey::new(&mut rng, 2048).expect("generate session keypair");
        let client = RsaPrivateKey::new(&mut rng, 2048).expect("generate client keypair");

        let session_der = session
            .to_public_key()
            .to_public_key_der()
            .expect("encode session public key");
        install_session_signer(session_der.as_bytes())
            .expect("session signer installed before first verification");

        TestIdentity { session, client }
    })
}

/// DER SubjectPublicKeyInfo encoding of a keypair's public half.
pub fn spki_der(key: &RsaPrivateKey) -> Vec<u8> {
    key.to_public_key()
        .to_public_key_der()
        .expect("encode public key")
        .into_vec()
}

/// PKCS#1 v1.5 signature over the concatenation of `spans`.
pub fn sign_spans(key: &RsaPrivateKey, algorithm: HashAlgorithm, spans: &[&[u8]]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha1 => {
            let mut hasher = Sha1::new();
            for span in spans {
                hasher.update(span);
            }
            key.sign(Pkcs1v15Sign::new::<Sha1>(), &hasher.finalize())
                .expect("sign fixture payload")
        }
        HashAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            for span in spans {
                hasher.update(span);
            }
            key.sign(Pkcs1v15Sign::new::<Sha256>(), &hasher.finalize())
                .expect("sign fixture payload")
        }
    }
}

/// Session signature over the linked-revision canonical input: holder
/// halves, decimal expiry, raw key bytes.
pub fn linked_signature(holder: Uuid, expiry_millis: i64, key_der: &[u8]) -> Vec<u8> {
    let id = holder.as_bytes();
    let expiry = expiry_millis.to_string();
    sign_spans(
        &identity().session,
        HashAlgorithm::Sha1,
        &[&id[..8], &id[8..], expiry.as_bytes(), key_der],
    )
}

/// Client signature over the canonical v1 payload spans.
pub fn payload_signature(salt: &[u8], sender: Uuid, expiry_millis: i64, body: &str) -> Vec<u8> {
    let expiry = expiry_millis.to_string();
    sign_spans(
        &identity().client,
        HashAlgorithm::Sha256,
        &[salt, sender.as_bytes(), expiry.as_bytes(), body.as_bytes()],
    )
}

/// A fixed far-future expiry (2100-01-01T00:00:00Z).
pub fn far_future_millis() -> i64 {
    4_102_444_800_000
}
