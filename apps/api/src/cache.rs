//! Time-boxed memoization keyed by request fingerprint.
//!
//! Entries expire lazily: staleness is checked (and the entry evicted) at
//! lookup time, there is no background sweep. The clock is injectable so
//! expiry can be tested deterministically.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Clock seam. Production uses `SystemClock`; tests inject a manual clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Derives a deterministic cache key from a request's input parameters.
/// Two inputs are cache-equivalent iff their serializations are equal, so
/// key types must serialize with a stable field order (serde structs/enums
/// do).
pub fn fingerprint<T: Serialize>(input: &T) -> String {
    serde_json::to_string(input).unwrap_or_default()
}

struct CacheEntry {
    payload: Value,
    inserted_at: Instant,
}

/// Process-wide cache with a fixed time-to-live, owned by whoever needs
/// memoization and passed by handle rather than living in global state.
pub struct TtlCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl TtlCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached payload for `key` if present and fresh. A stale
    /// entry is treated as absent and evicted.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        let fresh = match entries.get(key) {
            Some(entry) => self.clock.now().duration_since(entry.inserted_at) < self.ttl,
            None => return None,
        };
        if !fresh {
            entries.remove(key);
            return None;
        }
        entries
            .get(key)
            .and_then(|entry| serde_json::from_value(entry.payload.clone()).ok())
    }

    pub fn insert<T: Serialize>(&self, key: String, payload: &T) {
        let payload = match serde_json::to_value(payload) {
            Ok(v) => v,
            Err(_) => return,
        };
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(
            key,
            CacheEntry {
                payload,
                inserted_at: self.clock.now(),
            },
        );
    }
}
