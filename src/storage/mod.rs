//! Storage Module
//!
//! This module provides the expiring key-value store behind airpaste.
//! Values live in process memory only and are gone after a restart.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            ConcurrentStore              │
//! │   ┌─────────────────────────────────┐   │
//! │   │  RwLock<KvStore>                │   │
//! │   │    HashMap<String, Entry>       │   │
//! │   └─────────────────────────────────┘   │
//! └────────────────────┬────────────────────┘
//!                      │ now()
//!                      ▼
//!              ┌───────────────┐
//!              │     Clock     │
//!              └───────────────┘
//! ```
//!
//! ## Features
//!
//! - **TTL Support**: Every entry has a finite TTL (2 minutes by default) or is perpetual
//! - **Lazy Expiry**: Expired keys are removed by the read that notices them
//! - **RwLock**: Multiple concurrent readers, exclusive writers
//!
//! ## Example
//!
//! ```
//! use airpaste::storage::{ConcurrentStore, SetOptions};
//! use std::time::Duration;
//!
//! let store = ConcurrentStore::new();
//!
//! store.set("k3yz", "some text", None);
//! assert_eq!(store.get("k3yz"), Some("some text".to_string()));
//!
//! store.set("s3ss", "short lived", Some(SetOptions::with_ttl(Duration::from_secs(30))));
//! ```

pub mod clock;
pub mod engine;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{
    ConcurrentStore, Datastore, Entry, KvStore, Lookup, SetOptions, Ttl, DEFAULT_TTL,
};
