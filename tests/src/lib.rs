//! # Conduit Test Suite
//!
//! Unified test crate for the player-identity signature subsystem.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-layer flows through the public API
//!     ├── login_flow.rs # Key construction, validation, holder binding
//!     └── chat_flow.rs  # Signed chat message / command verification
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p conduit-tests
//!
//! # By category
//! cargo test -p conduit-tests integration::
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
