//! Gateway Module
//!
//! This module sits between the transport layer and the store. It exposes
//! exactly two operations:
//!
//! ```text
//! issue_and_store(value, options) ──> key | GatewayError
//! retrieve(key)                   ──> Some(value) | None
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP routes   │  (server module)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐      ┌─────────────────┐
//! │     Gateway     │─────>│  KeyGenerator   │  (keys module)
//! └────────┬────────┘      └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   Datastore     │  (storage module)
//! └─────────────────┘
//! ```

pub mod handler;

// Re-export the gateway and its error type
pub use handler::{Gateway, GatewayError, MAX_KEY_LEN, MIN_KEY_LEN};
