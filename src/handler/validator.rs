use std::sync::Arc;
use std::time::Duration;

use super::bounded;
use crate::cache::{CacheStatus, TtlCache};
use crate::catalog::Catalog;
use crate::error::Result;

/// Gate in front of Steam API calls
///
/// One catalog count per unknown id; both answers are cached so repeated bad
/// input costs nothing.
pub struct Validator {
    catalog: Arc<dyn Catalog>,
    cache: TtlCache<u32, bool>,
    timeout: Duration,
}

impl Validator {
    pub fn new(catalog: Arc<dyn Catalog>, cache: TtlCache<u32, bool>, timeout: Duration) -> Self {
        Self {
            catalog,
            cache,
            timeout,
        }
    }

    /// Whether the id is a catalog entry of an allowed kind
    pub async fn is_valid(&self, appid: u32) -> Result<bool> {
        if let Some(valid) = self.cache.get(&appid) {
            tracing::debug!(appid, valid, "validity cache hit");
            return Ok(valid);
        }

        let count = bounded(self.timeout, "app validation", self.catalog.count_valid(appid)).await?;
        let valid = count > 0;
        self.cache.put(appid, valid);

        tracing::debug!(appid, valid, "validated app id");
        Ok(valid)
    }

    pub fn status(&self) -> CacheStatus {
        self.cache.status()
    }
}
