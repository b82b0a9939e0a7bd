//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that the login/play packet handlers use
//!
//! This subsystem has no outbound ports: it answers questions, it never
//! drives I/O of its own.

pub mod inbound;
