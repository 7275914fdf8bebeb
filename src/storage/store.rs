//! In-Memory Key-Value Store
//!
//! A thread-safe map from byte-string keys to byte-string values. The store
//! is owned by the process and handed to each connection's dispatcher as an
//! `Arc<Store>`; there is no ambient global state.
//!
//! One command executes at a time per connection, so contention on the single
//! `RwLock` is limited to connections racing each other; reads take the
//! shared lock.

use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// The key-value store shared by all connections.
///
/// # Example
///
/// ```
/// use wirekv::storage::Store;
/// use bytes::Bytes;
///
/// let store = Store::new();
/// store.set(Bytes::from("name"), Bytes::from("wirekv"));
/// assert_eq!(store.get(&Bytes::from("name")), Some(Bytes::from("wirekv")));
/// ```
pub struct Store {
    data: RwLock<HashMap<Bytes, Bytes>>,

    /// Statistics: total GET operations
    get_count: AtomicU64,
    /// Statistics: total SET operations
    set_count: AtomicU64,
    /// Statistics: total DEL operations
    del_count: AtomicU64,
}

impl Store {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            get_count: AtomicU64::new(0),
            set_count: AtomicU64::new(0),
            del_count: AtomicU64::new(0),
        }
    }

    /// Looks up a key. Returns `None` if the key is absent.
    pub fn get(&self, key: &Bytes) -> Option<Bytes> {
        self.get_count.fetch_add(1, Ordering::Relaxed);
        self.data.read().unwrap().get(key).cloned()
    }

    /// Stores a value, overwriting any previous one.
    ///
    /// Returns `true` if the key was new.
    pub fn set(&self, key: Bytes, value: Bytes) -> bool {
        self.set_count.fetch_add(1, Ordering::Relaxed);
        self.data.write().unwrap().insert(key, value).is_none()
    }

    /// Removes a key; a no-op if it is absent.
    ///
    /// Returns `true` if a value was actually removed.
    pub fn delete(&self, key: &Bytes) -> bool {
        self.del_count.fetch_add(1, Ordering::Relaxed);
        self.data.write().unwrap().remove(key).is_some()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.data.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Operation counters since startup.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            keys: self.len() as u64,
            get_ops: self.get_count.load(Ordering::Relaxed),
            set_ops: self.set_count.load(Ordering::Relaxed),
            del_ops: self.del_count.load(Ordering::Relaxed),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("keys", &self.len())
            .finish()
    }
}

/// Store statistics.
#[derive(Debug, Clone, Copy)]
pub struct StoreStats {
    pub keys: u64,
    pub get_ops: u64,
    pub set_ops: u64,
    pub del_ops: u64,
}
