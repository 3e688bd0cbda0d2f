//! HTTP Server Module
//!
//! This module exposes the gateway over HTTP. It owns everything the core
//! deliberately knows nothing about: routing, parameter parsing, status
//! codes, and logging the cause of failed requests.
//!
//! ## Request Flow
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ TcpListener  │───>│ axum Router  │───>│   Gateway    │
//! │  (tokio)     │    │  (router.rs) │    │              │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! ## Status Codes
//!
//! - `200`: key issued, or value found
//! - `400`: `ttl` is not a non-negative whole number
//! - `404`: key absent or expired
//! - `500`: the gateway failed; the cause is logged, not returned

pub mod router;

pub use router::{parse_ttl, router, serve, CopyParams, TtlError};
