//! # Chat Flow
//!
//! Signed chat message and command verification as the play handler drives
//! it: the sender's key is already constructed and bound by the login flow,
//! and each incoming packet is checked against it.

#[cfg(test)]
use std::collections::HashMap;

#[cfg(test)]
use conduit_crypto::{
    IdentifiedKey, KeyRevision, PlayerIdentityApi, PlayerIdentityService, SignaturePair,
    SignedChatCommand, SignedChatMessage,
};

#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
use super::{far_future_millis, identity, linked_signature, payload_signature, spki_der};

/// A bound linked-revision key for `holder`, as it exists after login.
#[cfg(test)]
fn bound_key(holder: Uuid, expiry_millis: i64) -> IdentifiedKey {
    let key_der = spki_der(&identity().client);
    let signature = linked_signature(holder, expiry_millis, &key_der);
    let key = IdentifiedKey::new(KeyRevision::LinkedV2, &key_der, expiry_millis, &signature)
        .expect("valid wire material");
    assert!(key.bind_holder(holder));
    key
}

/// Test: an authentic chat message passes, and every tampered variant is
/// dropped.
#[cfg(test)]
#[test]
fn test_chat_message_round() {
    let service = PlayerIdentityService::new();
    let holder = Uuid::new_v4();
    let key = bound_key(holder, far_future_millis());

    let salt = vec![0xDE, 0xAD, 0xBE, 0xEF];
    let expiry_millis = far_future_millis();
    let message = SignedChatMessage {
        sender: holder,
        message: "hello world".to_string(),
        signature: payload_signature(&salt, holder, expiry_millis, "hello world"),
        expiry_millis,
        salt,
        signed_preview: false,
    };
    assert!(service.verify_chat_message(&key, &message));

    let mut tampered = message.clone();
    tampered.message = "hello w0rld".to_string();
    assert!(!service.verify_chat_message(&key, &tampered));

    let mut tampered = message.clone();
    tampered.signature[0] ^= 0x01;
    assert!(!service.verify_chat_message(&key, &tampered));
}

/// Test: a command is authentic only while every argument signature holds.
#[cfg(test)]
#[test]
fn test_chat_command_round() {
    let service = PlayerIdentityService::new();
    let holder = Uuid::new_v4();
    let key = bound_key(holder, far_future_millis());

    let salt = vec![0x11, 0x22];
    let expiry_millis = far_future_millis();
    let mut argument_signatures = HashMap::new();
    for argument in ["steve", "griefing"] {
        argument_signatures.insert(
            argument.to_string(),
            payload_signature(&salt, holder, expiry_millis, argument),
        );
    }
    let command = SignedChatCommand {
        sender: holder,
        command: "/ban steve griefing".to_string(),
        expiry_millis,
        salt,
        signed_preview: false,
        argument_signatures,
    };
    assert!(service.verify_chat_command(&key, &command));

    // Swapping two argument signatures breaks both entries.
    let mut swapped = command.clone();
    let steve = swapped.argument_signatures["steve"].clone();
    let griefing = swapped.argument_signatures["griefing"].clone();
    swapped.argument_signatures.insert("steve".to_string(), griefing);
    swapped.argument_signatures.insert("griefing".to_string(), steve);
    assert!(!service.verify_chat_command(&key, &swapped));

    // An unsigned-argument command rides on key validity alone.
    let mut bare = command.clone();
    bare.argument_signatures.clear();
    assert!(service.verify_chat_command(&key, &bare));
}

/// Test: payloads from a key whose session signature is stale are dropped,
/// even when the data signature itself is sound.
#[cfg(test)]
#[test]
fn test_stale_key_rejects_payloads() {
    let service = PlayerIdentityService::new();
    let holder = Uuid::new_v4();
    // Expired in 2023; the cross-signature still verifies.
    let key = bound_key(holder, 1_700_000_000_000);
    assert!(key.signature_valid());
    assert!(key.expired());

    let expiry_millis = far_future_millis();
    let message = SignedChatMessage {
        sender: holder,
        message: "too late".to_string(),
        signature: payload_signature(&[], holder, expiry_millis, "too late"),
        expiry_millis,
        salt: Vec::new(),
        signed_preview: false,
    };
    assert!(!service.verify_chat_message(&key, &message));
}

/// Test: emptiness of a signature pair needs both conditions.
#[cfg(test)]
#[test]
fn test_signature_pair_emptiness() {
    assert!(SignaturePair::empty().is_empty());
    assert!(SignaturePair {
        signer: Uuid::nil(),
        signature: Vec::new(),
    }
    .is_empty());
    assert!(!SignaturePair {
        signer: Uuid::nil(),
        signature: vec![1],
    }
    .is_empty());
    assert!(!SignaturePair {
        signer: Uuid::new_v4(),
        signature: Vec::new(),
    }
    .is_empty());
}
