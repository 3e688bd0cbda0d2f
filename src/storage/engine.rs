//! Expiring Key-Value Store
//!
//! This module implements the storage core of airpaste: a map from short keys
//! to text values, where every value carries a time-to-live that is enforced
//! lazily when the key is read.
//!
//! ## Design Decisions
//!
//! 1. **Lazy Expiry Only**: There is no sweeper. A read that finds a stale
//!    entry removes it, and that removal is the only way an entry ever leaves
//!    the map.
//! 2. **Composition for Locking**: [`KvStore`] is a plain single-owner map.
//!    [`ConcurrentStore`] wraps it in one `RwLock` and decides which lock mode
//!    each operation needs.
//! 3. **Injected Time**: "now" comes from a [`Clock`], so expiry can be tested
//!    with simulated delays.
//!
//! ## Concurrency Model
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               ConcurrentStore                │
//! │  ┌────────────────────────────────────────┐  │
//! │  │ RwLock<KvStore>                        │  │
//! │  │   get: read lock, write lock on expiry │  │
//! │  │   set: write lock                      │  │
//! │  └────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────┘
//! ```

use crate::storage::clock::{Clock, SystemClock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, SystemTime};

/// TTL applied when a caller does not ask for one.
pub const DEFAULT_TTL: Duration = Duration::from_secs(2 * 60);

/// How long an entry lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ttl {
    /// Expires once strictly more than this much time has passed since creation.
    Finite(Duration),
    /// Never expires.
    Perpetual,
}

impl Ttl {
    /// Interprets a signed count of seconds. Negative values mean "never expires".
    pub fn from_secs(secs: i64) -> Self {
        if secs < 0 {
            Ttl::Perpetual
        } else {
            Ttl::Finite(Duration::from_secs(secs.unsigned_abs()))
        }
    }

    #[inline]
    pub fn is_perpetual(&self) -> bool {
        matches!(self, Ttl::Perpetual)
    }
}

impl Default for Ttl {
    fn default() -> Self {
        Ttl::Finite(DEFAULT_TTL)
    }
}

impl From<Duration> for Ttl {
    fn from(ttl: Duration) -> Self {
        Ttl::Finite(ttl)
    }
}

/// Optional settings for [`Datastore::set`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Overrides [`DEFAULT_TTL`] when present.
    pub ttl: Option<Ttl>,
}

impl SetOptions {
    /// Options carrying an explicit TTL.
    pub fn with_ttl(ttl: impl Into<Ttl>) -> Self {
        Self {
            ttl: Some(ttl.into()),
        }
    }

    /// Options for an entry that never expires.
    pub fn perpetual() -> Self {
        Self::with_ttl(Ttl::Perpetual)
    }

    /// The TTL these options resolve to.
    pub fn effective_ttl(&self) -> Ttl {
        self.ttl.unwrap_or_default()
    }
}

/// A stored value together with its expiry policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    value: String,
    ttl: Ttl,
    /// Only meaningful for finite entries; perpetual entries keep the epoch.
    created_at: SystemTime,
}

impl Entry {
    /// Creates an entry stamped at `now`.
    pub fn new(value: impl Into<String>, ttl: Ttl, now: SystemTime) -> Self {
        let created_at = match ttl {
            Ttl::Finite(_) => now,
            Ttl::Perpetual => SystemTime::UNIX_EPOCH,
        };
        Self {
            value: value.into(),
            ttl,
            created_at,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Checks whether this entry is stale as of `now`.
    ///
    /// A clock that went backwards counts as zero elapsed time.
    #[inline]
    pub fn is_expired_at(&self, now: SystemTime) -> bool {
        match self.ttl {
            Ttl::Perpetual => false,
            Ttl::Finite(ttl) => {
                let elapsed = now
                    .duration_since(self.created_at)
                    .unwrap_or(Duration::ZERO);
                elapsed > ttl
            }
        }
    }
}

/// Result of looking at a key without modifying the map.
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup<'a> {
    Missing,
    Live(&'a Entry),
    /// Present but stale; the next mutable access should remove it.
    Expired,
}

/// The logical store contract the gateway talks to.
///
/// Both operations are total: there is no store-level error.
pub trait Datastore: Send + Sync {
    /// Returns the value for `key`, or `None` if it is absent or has expired.
    fn get(&self, key: &str) -> Option<String>;

    /// Inserts or replaces the entry for `key`.
    fn set(&self, key: &str, value: &str, options: Option<SetOptions>);
}

/// An unsynchronized expiring map.
///
/// Use it from a single owner, or behind [`ConcurrentStore`].
///
/// # Example
///
/// ```
/// use airpaste::storage::{KvStore, SetOptions};
/// use std::time::Duration;
///
/// let mut store = KvStore::new();
/// store.set("k1", "hello", Some(SetOptions::with_ttl(Duration::from_secs(60))));
/// assert_eq!(store.get("k1"), Some("hello".to_string()));
/// assert_eq!(store.get("missing"), None);
/// ```
pub struct KvStore {
    data: HashMap<String, Entry>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for KvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvStore")
            .field("entries", &self.data.len())
            .finish()
    }
}

impl Default for KvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore {
    /// Creates an empty store on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store reading time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            data: HashMap::new(),
            clock,
        }
    }

    /// Classifies `key` as missing, live, or expired.
    pub fn peek(&self, key: &str) -> Lookup<'_> {
        match self.data.get(key) {
            None => Lookup::Missing,
            Some(entry) if entry.is_expired_at(self.clock.now()) => Lookup::Expired,
            Some(entry) => Lookup::Live(entry),
        }
    }

    /// Gets the value for a key, removing the entry if it has expired.
    pub fn get(&mut self, key: &str) -> Option<String> {
        match self.peek(key) {
            Lookup::Missing => None,
            Lookup::Live(entry) => Some(entry.value().to_owned()),
            Lookup::Expired => {
                self.data.remove(key);
                None
            }
        }
    }

    /// Inserts or replaces the entry for `key`.
    ///
    /// Without options (or without a TTL in them) the entry gets [`DEFAULT_TTL`].
    pub fn set(&mut self, key: &str, value: &str, options: Option<SetOptions>) {
        let ttl = options.unwrap_or_default().effective_ttl();
        let entry = Entry::new(value, ttl, self.clock.now());
        self.data.insert(key.to_owned(), entry);
    }

    /// Number of entries in the map, including expired ones no read has seen yet.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A [`KvStore`] guarded by a single reader/writer lock.
///
/// This struct is designed to be shared across request handlers.
/// Reads of live or missing keys only take the shared lock; a read that
/// finds a stale entry re-checks and deletes it under the exclusive lock.
///
/// # Example
///
/// ```
/// use airpaste::storage::{ConcurrentStore, SetOptions};
///
/// let store = ConcurrentStore::new();
/// store.set("abcd", "forever", Some(SetOptions::perpetual()));
/// assert_eq!(store.get("abcd"), Some("forever".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct ConcurrentStore {
    inner: RwLock<KvStore>,
}

impl ConcurrentStore {
    pub fn new() -> Self {
        Self::from_store(KvStore::new())
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::from_store(KvStore::with_clock(clock))
    }

    /// Wraps an existing store.
    pub fn from_store(store: KvStore) -> Self {
        Self {
            inner: RwLock::new(store),
        }
    }

    // A panic while holding the lock cannot leave the map half-written,
    // so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, KvStore> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, KvStore> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Gets the value for a key.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    pub fn get(&self, key: &str) -> Option<String> {
        // Fast path: shared lock for missing and live keys
        {
            let store = self.read();
            match store.peek(key) {
                Lookup::Missing => return None,
                Lookup::Live(entry) => return Some(entry.value().to_owned()),
                Lookup::Expired => {}
            }
        }

        // Stale entry: the delete is a write. Another writer may have replaced
        // the entry in between, so the exclusive path re-checks.
        self.write().get(key)
    }

    /// Inserts or replaces the entry for `key`.
    pub fn set(&self, key: &str, value: &str, options: Option<SetOptions>) {
        self.write().set(key, value, options);
    }

    /// Number of entries in the map, including expired ones no read has seen yet.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl Datastore for ConcurrentStore {
    fn get(&self, key: &str) -> Option<String> {
        ConcurrentStore::get(self, key)
    }

    fn set(&self, key: &str, value: &str, options: Option<SetOptions>) {
        ConcurrentStore::set(self, key, value, options)
    }
}

impl<T: Datastore + ?Sized> Datastore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str, options: Option<SetOptions>) {
        (**self).set(key, value, options)
    }
}
