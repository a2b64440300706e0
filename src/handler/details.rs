use std::sync::Arc;
use std::time::Duration;

use super::bounded;
use super::validator::Validator;
use crate::cache::{CacheStatus, TtlCache};
use crate::error::Result;
use crate::steam::{AppInfo, SteamApi};

/// Cached store details plus achievement schema
pub struct DetailFetcher {
    validator: Arc<Validator>,
    steam: Arc<dyn SteamApi>,
    cache: TtlCache<u32, AppInfo>,
    timeout: Duration,
}

impl DetailFetcher {
    pub fn new(
        validator: Arc<Validator>,
        steam: Arc<dyn SteamApi>,
        cache: TtlCache<u32, AppInfo>,
        timeout: Duration,
    ) -> Self {
        Self {
            validator,
            steam,
            cache,
            timeout,
        }
    }

    /// Get app info, consulting Steam only for validated ids
    ///
    /// `Ok(None)` for invalid ids and apps the store has no data for. On a
    /// failed fetch an expired entry is returned if one exists.
    pub async fn get_app_info(&self, appid: u32) -> Result<Option<AppInfo>> {
        if let Some(info) = self.cache.get(&appid) {
            tracing::debug!(appid, "app info cache hit");
            return Ok(Some(info));
        }

        match self.validate_and_fetch(appid).await {
            Ok(Some(info)) => {
                self.cache.put(appid, info.clone());
                Ok(Some(info))
            }
            Ok(None) => Ok(None),
            Err(e) => match self.cache.get_stale(&appid) {
                Some(stale) => {
                    tracing::warn!(appid, error = %e, "serving expired app info");
                    Ok(Some(stale))
                }
                None => Err(e),
            },
        }
    }

    async fn validate_and_fetch(&self, appid: u32) -> Result<Option<AppInfo>> {
        if !self.validator.is_valid(appid).await? {
            tracing::debug!(appid, "skipping Steam lookup for invalid app id");
            return Ok(None);
        }

        let (details, schema) = tokio::join!(
            bounded(self.timeout, "app details", self.steam.app_details(appid)),
            bounded(self.timeout, "achievement schema", self.steam.achievement_schema(appid)),
        );

        let Some(details) = details? else {
            tracing::debug!(appid, "store has no details for app");
            return Ok(None);
        };

        // Details without a schema are still a complete answer
        let achievements = schema.unwrap_or_else(|e| {
            tracing::warn!(appid, error = %e, "achievement schema unavailable");
            None
        });

        Ok(Some(AppInfo::compile(appid, details, achievements)))
    }

    pub fn status(&self) -> CacheStatus {
        self.cache.status()
    }
}
