//! In-memory caches for reducing database and Steam API calls
//!
//! Every cache is a keyed map of value + insertion time with its own TTL.
//! Entries are never evicted; an expired entry stays readable through
//! [`TtlCache::get_stale`] until it is overwritten.

mod clock;
mod ttl;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ttl::{TtlCache, DEFAULT_TTL_MINUTES};

use serde::Serialize;

/// Status of a single cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStatus {
    /// Entries physically present, fresh or not
    pub entries: usize,
    /// Entries still inside the TTL window
    pub fresh: usize,
    pub ttl_minutes: u64,
}
