//! Keyed cache with a per-instance expiry window

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use super::clock::{Clock, SystemClock};
use super::CacheStatus;

/// Default cache TTL: 60 minutes
pub const DEFAULT_TTL_MINUTES: u64 = 60;

/// Cached value with metadata
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    /// When the entry was (re)populated
    inserted_at: DateTime<Utc>,
}

/// Time-bounded memoization layer
///
/// `get` only returns entries whose age is at most the TTL (inclusive).
/// `put` always overwrites and restamps; nothing is ever removed.
pub struct TtlCache<K, V> {
    entries: DashMap<K, CacheEntry<V>>,
    ttl_minutes: u64,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Create a new cache with the default TTL
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL_MINUTES)
    }

    /// Create with custom TTL
    pub fn with_ttl(ttl_minutes: u64) -> Self {
        Self::with_clock(ttl_minutes, Arc::new(SystemClock))
    }

    /// Create with custom TTL and time source
    pub fn with_clock(ttl_minutes: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl_minutes,
            ttl: Duration::from_secs(ttl_minutes.saturating_mul(60)),
            clock,
        }
    }

    /// Get a value that is still inside the TTL window
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup(key, false)
    }

    /// Get a value regardless of its age
    pub fn get_stale<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup(key, true)
    }

    /// Get a value, optionally ignoring expiry
    pub fn lookup<Q>(&self, key: &Q, allow_stale: bool) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entry = self.entries.get(key)?;

        if allow_stale || self.is_fresh(entry.inserted_at) {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Insert or overwrite a value, stamped with the current time
    pub fn put(&self, key: K, value: V) {
        let entry = CacheEntry {
            value,
            inserted_at: self.clock.now(),
        };
        self.entries.insert(key, entry);
    }

    /// Number of entries physically present
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ttl_minutes(&self) -> u64 {
        self.ttl_minutes
    }

    /// Get cache status
    pub fn status(&self) -> CacheStatus {
        let fresh = self
            .entries
            .iter()
            .filter(|entry| self.is_fresh(entry.inserted_at))
            .count();

        CacheStatus {
            entries: self.entries.len(),
            fresh,
            ttl_minutes: self.ttl_minutes,
        }
    }

    fn is_fresh(&self, inserted_at: DateTime<Utc>) -> bool {
        // A timestamp from the future (clock stepped back) counts as age zero
        let age = (self.clock.now() - inserted_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
        age <= self.ttl
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
