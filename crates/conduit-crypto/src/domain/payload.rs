//! # Signed Payload Contracts
//!
//! Per-packet value objects for signed chat messages and chat commands. Both
//! are transient: the play handler builds one from an incoming packet, asks
//! it to verify against the sender's bound [`IdentifiedKey`], and drops it.
//!
//! ## Payload canonicalization v1
//!
//! The client signs, with its own key under SHA-256, the concatenation of:
//!
//! 1. the salt (possibly empty),
//! 2. the sender identity's 16 raw bytes,
//! 3. the millisecond expiry rendered as decimal text,
//! 4. the UTF-8 body: the message text, or for commands the literal
//!    argument text of the entry being verified.
//!
//! Each command argument carries its own signature over its own body, so
//! entries verify independently; map keys are unique and verification order
//! is irrelevant. Reconstructing the original command line is the caller's
//! concern, not this module's.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::key::IdentifiedKey;

/// A signed chat message as received by the play handler.
#[derive(Debug, Clone)]
pub struct SignedChatMessage {
    /// Identity of the sending player.
    pub sender: Uuid,
    /// The literal message text.
    pub message: String,
    /// Client signature over the canonical payload.
    pub signature: Vec<u8>,
    /// Millisecond expiry of the signature.
    pub expiry_millis: i64,
    /// Replay-prevention salt; empty when unsalted.
    pub salt: Vec<u8>,
    /// True when the signature covers a stylized preview rendering instead
    /// of the literal text.
    pub signed_preview: bool,
}

impl SignedChatMessage {
    /// Verify this message against the sender's bound key.
    ///
    /// Requires the key itself to be signature-valid and unexpired, then
    /// checks the message signature over the canonical v1 payload.
    pub fn verify(&self, key: &IdentifiedKey) -> bool {
        if !key.signature_valid() || key.expired() {
            return false;
        }
        let expiry = self.expiry_millis.to_string();
        key.verify_data_signature(
            &self.signature,
            &[
                &self.salt,
                self.sender.as_bytes(),
                expiry.as_bytes(),
                self.message.as_bytes(),
            ],
        )
    }
}

/// A signed chat command as received by the play handler.
///
/// Each previewed or argument segment of the command is signed separately;
/// `argument_signatures` maps the literal argument text to its signature.
#[derive(Debug, Clone)]
pub struct SignedChatCommand {
    /// Identity of the sending player.
    pub sender: Uuid,
    /// The literal command text.
    pub command: String,
    /// Millisecond expiry of the signatures.
    pub expiry_millis: i64,
    /// Replay-prevention salt; empty when unsalted.
    pub salt: Vec<u8>,
    /// True when the signatures cover stylized preview renderings.
    pub signed_preview: bool,
    /// Independent signature per literal argument text.
    pub argument_signatures: HashMap<String, Vec<u8>>,
}

impl SignedChatCommand {
    /// Verify this command against the sender's bound key.
    ///
    /// Overall validity is the logical AND of every argument entry's
    /// verification plus the key's own validity and non-expiry. A command
    /// with no signed arguments is valid whenever its key is.
    pub fn verify(&self, key: &IdentifiedKey) -> bool {
        if !key.signature_valid() || key.expired() {
            return false;
        }
        let expiry = self.expiry_millis.to_string();
        self.argument_signatures.iter().all(|(argument, signature)| {
            key.verify_data_signature(
                signature,
                &[
                    &self.salt,
                    self.sender.as_bytes(),
                    expiry.as_bytes(),
                    argument.as_bytes(),
                ],
            )
        })
    }
}

/// Lightweight (holder, signature) carrier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturePair {
    /// Identity of the signer; nil when absent.
    pub signer: Uuid,
    /// Raw signature bytes; empty when absent.
    pub signature: Vec<u8>,
}

impl SignaturePair {
    /// The empty pair: nil signer, zero-length signature.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True only when the signer is nil AND the signature is zero-length.
    pub fn is_empty(&self) -> bool {
        self.signer.is_nil() && self.signature.is_empty()
    }
}
