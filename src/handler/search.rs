use std::sync::Arc;
use std::time::Duration;

use super::bounded;
use crate::cache::{CacheStatus, TtlCache};
use crate::catalog::{AppSummary, Catalog};

/// Longest accepted search text, in characters
pub const MAX_SEARCH_LEN: usize = 1024;

/// Cached name/id search over the catalog
///
/// Keys are the exact search text: no trimming or case folding.
pub struct SearchService {
    catalog: Arc<dyn Catalog>,
    cache: TtlCache<String, Vec<AppSummary>>,
    limit: u32,
    timeout: Duration,
}

impl SearchService {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        cache: TtlCache<String, Vec<AppSummary>>,
        limit: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            cache,
            limit,
            timeout,
        }
    }

    /// Search the catalog
    ///
    /// `None` when the text is too long; an empty list when the catalog fails
    /// and there is no earlier answer for the same text.
    pub async fn search(&self, text: &str) -> Option<Vec<AppSummary>> {
        if text.chars().count() > MAX_SEARCH_LEN {
            tracing::debug!(len = text.len(), "rejected oversized search text");
            return None;
        }

        if let Some(results) = self.cache.get(text) {
            tracing::debug!(text, "search cache hit");
            return Some(results);
        }

        match bounded(self.timeout, "catalog search", self.catalog.search(text, self.limit)).await {
            Ok(results) => {
                self.cache.put(text.to_string(), results.clone());
                Some(results)
            }
            Err(e) => {
                tracing::warn!(text, error = %e, "catalog search failed");
                Some(self.cache.get_stale(text).unwrap_or_default())
            }
        }
    }

    pub fn status(&self) -> CacheStatus {
        self.cache.status()
    }
}
