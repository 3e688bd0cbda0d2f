//! Key Issuer / Gateway
//!
//! The gateway is the only thing the transport layer talks to. It turns a
//! value into a fresh key (`issue_and_store`) and a key back into a value
//! (`retrieve`).
//!
//! ## Issuance
//!
//! ```text
//! size = 4
//!   │
//!   ▼
//! ┌───────────────────┐  size > 8   ┌────────────────┐
//! │ check size bound  │────────────>│ KeyExhaustion  │
//! └─────────┬─────────┘             └────────────────┘
//!           ▼
//! ┌───────────────────┐
//! │ generate(size)    │──── error ──> RandomSource
//! └─────────┬─────────┘
//!           ▼
//! ┌───────────────────┐  occupied
//! │ store.get(key)    │──────────> size += 1, loop
//! └─────────┬─────────┘
//!           │ free
//!           ▼
//!   store.set(key) ──> Ok(key)
//! ```
//!
//! The lookup and the set are two separate store calls. Two concurrent
//! issuances can pick the same free key and the later `set` silently
//! replaces the earlier entry (last write wins).

use crate::keys::{KeyError, KeyGenerator, OsKeyGenerator};
use crate::storage::{ConcurrentStore, Datastore, SetOptions};

/// Length of the first candidate key.
pub const MIN_KEY_LEN: usize = 4;

/// Longest candidate tried before giving up.
pub const MAX_KEY_LEN: usize = 8;

/// Errors returned by [`Gateway::issue_and_store`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Every candidate from `MIN_KEY_LEN` to `max_len` was already taken.
    #[error("could not generate a unique key (tried lengths up to {max_len})")]
    KeyExhaustion { max_len: usize },

    /// The random source failed; the request must be aborted.
    #[error(transparent)]
    RandomSource(#[from] KeyError),
}

/// Issues keys and binds them to values in a [`Datastore`].
///
/// # Example
///
/// ```
/// use airpaste::gateway::Gateway;
///
/// let gateway = Gateway::in_memory();
///
/// let key = gateway.issue_and_store("hello", None).unwrap();
/// assert_eq!(key.len(), 4);
/// assert_eq!(gateway.retrieve(&key), Some("hello".to_string()));
/// ```
pub struct Gateway<S = ConcurrentStore, G = OsKeyGenerator> {
    store: S,
    keygen: G,
}

impl<S, G> std::fmt::Debug for Gateway<S, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("min_key_len", &MIN_KEY_LEN)
            .field("max_key_len", &MAX_KEY_LEN)
            .finish_non_exhaustive()
    }
}

impl Gateway {
    /// A gateway over a fresh [`ConcurrentStore`] with OS-random keys.
    pub fn in_memory() -> Self {
        Self::new(ConcurrentStore::new(), OsKeyGenerator)
    }
}

impl Default for Gateway {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<S: Datastore, G: KeyGenerator> Gateway<S, G> {
    /// Creates a gateway over `store`, drawing keys from `keygen`.
    pub fn new(store: S, keygen: G) -> Self {
        Self { store, keygen }
    }

    /// Stores `value` under a fresh key and returns the key.
    ///
    /// `options` is passed to the store untouched; `None` means the
    /// default TTL.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::KeyExhaustion`] if every length from 4 to 8 collided
    /// - [`GatewayError::RandomSource`] if the random source failed
    pub fn issue_and_store(
        &self,
        value: &str,
        options: Option<SetOptions>,
    ) -> Result<String, GatewayError> {
        for size in MIN_KEY_LEN..=MAX_KEY_LEN {
            let key = self.keygen.generate(size)?;

            if self.store.get(&key).is_none() {
                self.store.set(&key, value, options);
                return Ok(key);
            }
        }

        Err(GatewayError::KeyExhaustion {
            max_len: MAX_KEY_LEN,
        })
    }

    /// Looks up `key`. `None` means absent or expired, which is not an error.
    pub fn retrieve(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
