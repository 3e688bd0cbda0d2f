//! # AirPaste - An Ephemeral Text-Sharing Relay
//!
//! AirPaste accepts a blob of text, hands back a short random key, and lets
//! anyone holding that key fetch the text until it expires. It is meant for
//! the moments when the clipboard does not cross an SSH session or a remote
//! desktop.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          AirPaste                           │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────────┐  │
//! │  │ HTTP Server │───>│   Gateway   │───>│  KeyGenerator   │  │
//! │  │   (axum)    │    │             │    │   (OS CSPRNG)   │  │
//! │  └─────────────┘    └──────┬──────┘    └─────────────────┘  │
//! │                            │                                │
//! │                            ▼                                │
//! │                 ┌─────────────────────┐                     │
//! │                 │   ConcurrentStore   │                     │
//! │                 │  RwLock<KvStore>    │                     │
//! │                 │  lazy TTL expiry    │                     │
//! │                 └─────────────────────┘                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use airpaste::gateway::Gateway;
//! use airpaste::server::serve;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let gateway = Arc::new(Gateway::in_memory());
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     serve(listener, gateway, std::future::pending()).await
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`storage`]: Expiring key-value store with lazy, read-time expiry
//! - [`keys`]: Random key generation over `0-9a-z`
//! - [`gateway`]: Collision-aware key issuance on top of the store
//! - [`server`]: HTTP routes for copying and pasting
//! - [`config`]: Host/port configuration from flags and environment
//!
//! ## Design Highlights
//!
//! ### Short Keys First
//!
//! Keys start at 4 symbols. On a collision the gateway tries one symbol
//! longer, up to 8, and then gives up with
//! [`GatewayError::KeyExhaustion`](gateway::GatewayError::KeyExhaustion).
//!
//! ### Lazy Expiry
//!
//! There is no background sweeper. An entry past its TTL is removed by
//! the first read that notices it.
//!
//! ### Memory Only
//!
//! Nothing is persisted; restarting the process drops every entry.

pub mod config;
pub mod gateway;
pub mod keys;
pub mod server;
pub mod storage;

// Re-export commonly used types for convenience
pub use gateway::{Gateway, GatewayError};
pub use keys::{KeyError, KeyGenerator, OsKeyGenerator};
pub use storage::{ConcurrentStore, Datastore, SetOptions, Ttl, DEFAULT_TTL};

/// The default port AirPaste listens on
pub const DEFAULT_PORT: u16 = 8080;

/// The default host AirPaste binds to
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Version of AirPaste
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
