//! # Player Identity Service
//!
//! Application service that implements [`PlayerIdentityApi`] by delegating
//! to the domain layer and reporting decisions through `tracing`. Stateless
//! besides the process-wide session signer; one instance serves every
//! connection task.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::errors::KeyError;
use crate::domain::key::IdentifiedKey;
use crate::domain::payload::{SignedChatCommand, SignedChatMessage};
use crate::domain::revision::KeyRevision;
use crate::ports::inbound::PlayerIdentityApi;

/// Player identity verification service.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerIdentityService;

impl PlayerIdentityService {
    /// Create a new service.
    pub fn new() -> Self {
        Self
    }
}

impl PlayerIdentityApi for PlayerIdentityService {
    fn create_identified_key(
        &self,
        revision: KeyRevision,
        key_bytes: &[u8],
        expiry_millis: i64,
        signature: &[u8],
    ) -> Result<Arc<IdentifiedKey>, KeyError> {
        match IdentifiedKey::new(revision, key_bytes, expiry_millis, signature) {
            Ok(key) => {
                debug!(?revision, expiry_millis, "accepted identified key material");
                Ok(Arc::new(key))
            }
            Err(err) => {
                warn!(?revision, %err, "rejected identified key material");
                Err(err)
            }
        }
    }

    fn bind_holder(&self, key: &IdentifiedKey, holder: Uuid) -> bool {
        let bound = key.bind_holder(holder);
        if !bound {
            warn!(
                %holder,
                bound_holder = ?key.holder(),
                revision = ?key.revision(),
                "holder binding rejected"
            );
        }
        bound
    }

    fn verify_chat_message(&self, key: &IdentifiedKey, message: &SignedChatMessage) -> bool {
        let authentic = message.verify(key);
        if !authentic {
            debug!(sender = %message.sender, "dropping chat message with invalid signature");
        }
        authentic
    }

    fn verify_chat_command(&self, key: &IdentifiedKey, command: &SignedChatCommand) -> bool {
        let authentic = command.verify(key);
        if !authentic {
            debug!(
                sender = %command.sender,
                command = %command.command,
                "dropping chat command with invalid signature"
            );
        }
        authentic
    }
}
