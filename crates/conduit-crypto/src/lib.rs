//! # Player-Identity Signature Subsystem
//!
//! Verifies and manages the session-server-issued, cryptographically signed
//! public keys ("identified keys") that modern protocol versions attach to a
//! connecting player, plus the signed chat/command payloads built on top of
//! that key.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Pure cryptographic logic, no I/O
//! - **Ports Layer** (`ports/`): Trait definitions for the inbound interface
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! The login and play packet handlers are the callers: the login handler
//! constructs an [`IdentifiedKey`] from wire-level key material and binds the
//! holder once authentication completes; the play handler verifies signed
//! chat messages and commands against the bound key. This crate never drives
//! protocol I/O itself.
//!
//! ## Security Notes
//!
//! - Every identified key is verified against the session server's root
//!   public key (the trust anchor), never against itself.
//! - Chat/command payload signatures are verified against the player's own
//!   embedded key, since the signer there is the player's client.
//! - All verification failures collapse to `false`; callers get no oracle
//!   distinguishing bad signatures from bad keys.

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::anchor::{install_session_signer, session_signer};
pub use domain::errors::KeyError;
pub use domain::key::IdentifiedKey;
pub use domain::payload::{SignaturePair, SignedChatCommand, SignedChatMessage};
pub use domain::revision::{pem_encode_key, KeyRevision};
pub use domain::verifier::{verify_signature, HashAlgorithm};
pub use ports::inbound::PlayerIdentityApi;
pub use service::PlayerIdentityService;
