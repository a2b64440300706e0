use std::sync::Arc;
use std::time::Duration;

use super::bounded;
use super::validator::Validator;
use crate::cache::{CacheStatus, TtlCache};
use crate::error::Result;
use crate::steam::{PlayerStats, SteamApi};

/// Cache key for one user's progress in one app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserKey {
    pub appid: u32,
    pub steamid: u64,
}

/// Cached per-user achievement progress
///
/// Never falls back to expired data: progress is only useful while current.
pub struct UserFetcher {
    validator: Arc<Validator>,
    steam: Arc<dyn SteamApi>,
    cache: TtlCache<UserKey, PlayerStats>,
    timeout: Duration,
}

impl UserFetcher {
    pub fn new(
        validator: Arc<Validator>,
        steam: Arc<dyn SteamApi>,
        cache: TtlCache<UserKey, PlayerStats>,
        timeout: Duration,
    ) -> Self {
        Self {
            validator,
            steam,
            cache,
            timeout,
        }
    }

    pub async fn get_user_info(&self, appid: u32, steamid: u64) -> Result<Option<PlayerStats>> {
        let key = UserKey { appid, steamid };

        if let Some(stats) = self.cache.get(&key) {
            tracing::debug!(appid, steamid, "user info cache hit");
            return Ok(Some(stats));
        }

        if !self.validator.is_valid(appid).await? {
            tracing::debug!(appid, "skipping Steam lookup for invalid app id");
            return Ok(None);
        }

        let stats = bounded(self.timeout, "user stats", self.steam.user_stats(appid, steamid))
            .await?
            .filter(|stats| !stats.is_error_document());
        if let Some(ref stats) = stats {
            self.cache.put(key, stats.clone());
        }

        Ok(stats)
    }

    pub fn status(&self) -> CacheStatus {
        self.cache.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::handler::testing::{row, FakeCatalog, FakeSteam};

    const GABEN: u64 = 76561197960287930;

    struct Fixture {
        steam: Arc<FakeSteam>,
        clock: Arc<ManualClock>,
        fetcher: UserFetcher,
    }

    fn fixture(steam: FakeSteam) -> Fixture {
        let catalog = Arc::new(FakeCatalog::new(vec![
            row(400, "Portal", "game"),
            row(10, "Broken", "invalid"),
        ]));
        let steam = Arc::new(steam);
        let clock = Arc::new(ManualClock::default());
        let timeout = Duration::from_secs(5);
        let validator = Arc::new(Validator::new(catalog, TtlCache::with_ttl(1440), timeout));
        let fetcher = UserFetcher::new(
            validator,
            steam.clone(),
            TtlCache::with_clock(10, clock.clone()),
            timeout,
        );

        Fixture {
            steam,
            clock,
            fetcher,
        }
    }

    #[tokio::test]
    async fn test_stats_are_cached_within_ttl() {
        let f = fixture(FakeSteam::default().with_stats(400, GABEN, "Portal"));

        let first = f.fetcher.get_user_info(400, GABEN).await.unwrap().unwrap();
        f.clock.advance(chrono::Duration::minutes(10));
        let second = f.fetcher.get_user_info(400, GABEN).await.unwrap().unwrap();

        assert_eq!(first, second);
        assert_eq!(f.steam.stats_fetches(), 1);

        f.clock.advance(chrono::Duration::seconds(1));
        f.fetcher.get_user_info(400, GABEN).await.unwrap();
        assert_eq!(f.steam.stats_fetches(), 2);
    }

    #[tokio::test]
    async fn test_invalid_app_never_reaches_steam() {
        let f = fixture(FakeSteam::default().with_stats(10, GABEN, "Broken"));

        assert!(f.fetcher.get_user_info(10, GABEN).await.unwrap().is_none());
        assert_eq!(f.steam.stats_fetches(), 0);
    }

    #[tokio::test]
    async fn test_empty_answer_is_not_cached() {
        let f = fixture(FakeSteam::default());

        assert!(f.fetcher.get_user_info(400, GABEN).await.unwrap().is_none());
        assert!(f.fetcher.get_user_info(400, GABEN).await.unwrap().is_none());
        assert_eq!(f.steam.stats_fetches(), 2);
    }

    #[tokio::test]
    async fn test_private_profile_document_is_none_and_not_cached() {
        let f = fixture(FakeSteam::default().with_private_profile(400, GABEN));

        assert!(f.fetcher.get_user_info(400, GABEN).await.unwrap().is_none());
        assert!(f.fetcher.get_user_info(400, GABEN).await.unwrap().is_none());
        assert_eq!(f.steam.stats_fetches(), 2);
        assert_eq!(f.fetcher.status().entries, 0);
    }

    #[tokio::test]
    async fn test_failure_is_error_and_expired_data_is_not_served() {
        let f = fixture(FakeSteam::default().with_stats(400, GABEN, "Portal"));

        f.fetcher.get_user_info(400, GABEN).await.unwrap();
        f.clock.advance(chrono::Duration::minutes(11));
        f.steam.fail(true);

        assert!(f.fetcher.get_user_info(400, GABEN).await.is_err());
    }

    #[tokio::test]
    async fn test_keys_distinguish_app_and_user() {
        let f = fixture(
            FakeSteam::default()
                .with_stats(400, 1, "first")
                .with_stats(400, 2, "second"),
        );

        let first = f.fetcher.get_user_info(400, 1).await.unwrap().unwrap();
        let second = f.fetcher.get_user_info(400, 2).await.unwrap().unwrap();

        assert_eq!(first.game_name.as_deref(), Some("first"));
        assert_eq!(second.game_name.as_deref(), Some("second"));
        assert_eq!(f.fetcher.status().entries, 2);
    }
}
