//! Time-boxed price cache.
//!
//! Constructed once per service instance and shared by reference with every
//! resolver; there is no ambient global cache. Entries never outlive their
//! TTL: an expired entry is a miss and is evicted on read.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::domain::pricing::{PriceFingerprint, ResolvedPrice};

#[derive(Debug, Clone)]
struct CacheEntry {
    value: ResolvedPrice,
    expires_at: Instant,
}

/// In-memory cache from price fingerprint to resolved price.
#[derive(Debug)]
pub struct PriceCache {
    ttl: Duration,
    entries: Mutex<HashMap<PriceFingerprint, CacheEntry>>,
}

impl PriceCache {
    /// Default entry lifetime.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

    /// Create a cache whose entries live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Entry lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached price for `key`, if present and fresh.
    pub fn get(&self, key: &PriceFingerprint) -> Option<ResolvedPrice> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if Instant::now() < entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store `value` under `key` for the cache TTL.
    pub fn put(&self, key: PriceFingerprint, value: ResolvedPrice) {
        let expires_at = Instant::now() + self.ttl;
        self.entries.lock().insert(key, CacheEntry { value, expires_at });
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of stored entries, fresh or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// True when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}
