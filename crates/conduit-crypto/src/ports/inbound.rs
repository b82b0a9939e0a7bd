//! # Inbound Ports (Driving Ports / API)
//!
//! The surface the login-phase and play-phase packet handlers consume. The
//! handlers own all protocol I/O and retries; every answer from this API is
//! final for the input it was given.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::KeyError;
use crate::domain::key::IdentifiedKey;
use crate::domain::payload::{SignedChatCommand, SignedChatMessage};
use crate::domain::revision::KeyRevision;

/// Primary player-identity API.
///
/// Implementations must be thread-safe (`Send + Sync`): the proxy runs one
/// task per client connection and shares the service across all of them.
pub trait PlayerIdentityApi: Send + Sync {
    /// Construct an identified key from wire-level login material.
    ///
    /// The login handler disconnects the connection when this fails; a
    /// decode failure is final for that connection attempt.
    fn create_identified_key(
        &self,
        revision: KeyRevision,
        key_bytes: &[u8],
        expiry_millis: i64,
        signature: &[u8],
    ) -> Result<Arc<IdentifiedKey>, KeyError>;

    /// Bind the authenticated player to a key after login completes.
    ///
    /// Returns the key's validity under that holder; see
    /// [`IdentifiedKey::bind_holder`] for the binding rules.
    fn bind_holder(&self, key: &IdentifiedKey, holder: Uuid) -> bool;

    /// Decide whether an incoming chat message is authentic.
    fn verify_chat_message(&self, key: &IdentifiedKey, message: &SignedChatMessage) -> bool;

    /// Decide whether an incoming chat command is authentic.
    fn verify_chat_command(&self, key: &IdentifiedKey, command: &SignedChatCommand) -> bool;
}
