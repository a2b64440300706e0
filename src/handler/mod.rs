//! Request orchestration over the catalog and the Steam API
//!
//! [`AppHandler`] owns one cache per concern and exposes the three lookups
//! served to clients. Its public operations never fail: every error is
//! logged and answered with `None` or an empty list.

mod details;
mod search;
mod users;
mod validator;

#[cfg(test)]
pub(crate) mod testing;

pub use details::DetailFetcher;
pub use search::{SearchService, MAX_SEARCH_LEN};
pub use users::{UserFetcher, UserKey};
pub use validator::Validator;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::cache::{CacheStatus, Clock, SystemClock, TtlCache};
use crate::catalog::{AppSummary, Catalog};
use crate::config::{CacheConfig, LimitsConfig};
use crate::error::{Result, ScoutError};
use crate::steam::{AppInfo, PlayerStats, SteamApi};

/// Longest vanity name sent to Steam
const MAX_VANITY_LEN: usize = 64;

/// Per-cache status for every cache the handler owns
#[derive(Debug, Clone, Serialize)]
pub struct HandlerStats {
    pub search: CacheStatus,
    pub app_info: CacheStatus,
    pub user_info: CacheStatus,
    pub validity: CacheStatus,
}

/// Handles searching and retrieving game and achievement details, caching results
pub struct AppHandler {
    searcher: SearchService,
    details: DetailFetcher,
    users: UserFetcher,
    validator: Arc<Validator>,
    steam: Arc<dyn SteamApi>,
    timeout: Duration,
}

impl AppHandler {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        steam: Arc<dyn SteamApi>,
        cache: &CacheConfig,
        limits: &LimitsConfig,
    ) -> Self {
        Self::with_clock(catalog, steam, cache, limits, Arc::new(SystemClock))
    }

    /// Build with an explicit time source for every cache
    pub fn with_clock(
        catalog: Arc<dyn Catalog>,
        steam: Arc<dyn SteamApi>,
        cache: &CacheConfig,
        limits: &LimitsConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let timeout = Duration::from_secs(limits.fetch_timeout_secs);

        let validator = Arc::new(Validator::new(
            catalog.clone(),
            TtlCache::with_clock(cache.validity_ttl_minutes, clock.clone()),
            timeout,
        ));
        let searcher = SearchService::new(
            catalog,
            TtlCache::with_clock(cache.search_ttl_minutes, clock.clone()),
            limits.search_limit,
            timeout,
        );
        let details = DetailFetcher::new(
            validator.clone(),
            steam.clone(),
            TtlCache::with_clock(cache.app_info_ttl_minutes, clock.clone()),
            timeout,
        );
        let users = UserFetcher::new(
            validator.clone(),
            steam.clone(),
            TtlCache::with_clock(cache.user_info_ttl_minutes, clock),
            timeout,
        );

        Self {
            searcher,
            details,
            users,
            validator,
            steam,
            timeout,
        }
    }

    /// Games matching a name or id, best match first
    ///
    /// `None` if the text is longer than [`MAX_SEARCH_LEN`] characters.
    pub async fn search(&self, text: &str) -> Option<Vec<AppSummary>> {
        self.searcher.search(text).await
    }

    /// Store details and achievement schema for an app id
    pub async fn get_app_info(&self, appid: &str) -> Option<AppInfo> {
        let Some(id) = parse_appid(appid) else {
            tracing::debug!(appid, "malformed app id");
            return None;
        };

        self.details
            .get_app_info(id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(appid = id, error = %e, "app info lookup failed");
                None
            })
    }

    /// A user's achievement progress in an app
    pub async fn get_user_info(&self, appid: &str, steamid: &str) -> Option<PlayerStats> {
        let (Some(app), Some(user)) = (parse_appid(appid), parse_steamid(steamid)) else {
            tracing::debug!(appid, steamid, "malformed app or steam id");
            return None;
        };

        self.users
            .get_user_info(app, user)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(appid = app, steamid = user, error = %e, "user info lookup failed");
                None
            })
    }

    /// Resolve a profile vanity name to a Steam id
    pub async fn resolve_steam_id(&self, name: &str) -> Option<u64> {
        if name.is_empty() || name.chars().count() > MAX_VANITY_LEN {
            return None;
        }

        bounded(self.timeout, "vanity lookup", self.steam.resolve_vanity(name))
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(name, error = %e, "vanity lookup failed");
                None
            })
    }

    /// Entry counts for every cache
    pub fn cache_stats(&self) -> HandlerStats {
        HandlerStats {
            search: self.searcher.status(),
            app_info: self.details.status(),
            user_info: self.users.status(),
            validity: self.validator.status(),
        }
    }
}

/// Parse a decimal app id; anything else is not an id
pub fn parse_appid(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Parse a decimal 64-bit Steam id
pub fn parse_steamid(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Run a fetch with an upper bound on its duration
pub(crate) async fn bounded<T, F>(limit: Duration, what: &'static str, fetch: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, fetch).await {
        Ok(result) => result,
        Err(_) => Err(ScoutError::Timeout(what, limit.as_secs())),
    }
}
