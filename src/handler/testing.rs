//! Call-counting fakes for the catalog and Steam collaborators

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::catalog::{AppSummary, Catalog, MemoryCatalog};
use crate::error::{Result, ScoutError};
use crate::steam::{Achievement, AppDetails, PlayerStats, SteamApi};

pub fn row(appid: u32, name: &str, app_type: &str) -> AppSummary {
    AppSummary {
        appid,
        name: name.to_string(),
        app_type: app_type.to_string(),
        header_image: None,
        background: None,
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    inner: MemoryCatalog,
    pub search_calls: AtomicUsize,
    pub count_calls: AtomicUsize,
    pub failing: AtomicBool,
}

impl FakeCatalog {
    pub fn new(rows: Vec<AppSummary>) -> Self {
        Self {
            inner: MemoryCatalog::new(rows),
            ..Default::default()
        }
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn searches(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn counts(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ScoutError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn search(&self, text: &str, limit: u32) -> Result<Vec<AppSummary>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.search(text, limit).await
    }

    async fn count_valid(&self, appid: u32) -> Result<u64> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.count_valid(appid).await
    }
}

#[derive(Default)]
pub struct FakeSteam {
    pub details: HashMap<u32, AppDetails>,
    pub schemas: HashMap<u32, Vec<Achievement>>,
    pub stats: HashMap<(u32, u64), PlayerStats>,
    pub vanity: HashMap<String, u64>,
    pub detail_calls: AtomicUsize,
    pub schema_calls: AtomicUsize,
    pub stats_calls: AtomicUsize,
    pub failing: AtomicBool,
    pub schema_failing: AtomicBool,
}

impl FakeSteam {
    pub fn with_app(mut self, appid: u32, name: &str) -> Self {
        self.details.insert(
            appid,
            AppDetails {
                name: Some(name.to_string()),
                app_type: Some("game".to_string()),
                ..Default::default()
            },
        );
        self
    }

    pub fn with_schema(mut self, appid: u32, names: &[&str]) -> Self {
        let achievements = names
            .iter()
            .map(|name| Achievement {
                name: name.to_string(),
                display_name: name.to_lowercase(),
                description: None,
                icon: None,
                icongray: None,
                hidden: false,
            })
            .collect();
        self.schemas.insert(appid, achievements);
        self
    }

    pub fn with_stats(mut self, appid: u32, steamid: u64, game_name: &str) -> Self {
        self.stats.insert(
            (appid, steamid),
            PlayerStats {
                steam_id: Some(steamid.to_string()),
                game_name: Some(game_name.to_string()),
                achievements: Vec::new(),
                extra: serde_json::Map::new(),
            },
        );
        self
    }

    /// Steam's `200` answer for a private profile
    pub fn with_private_profile(mut self, appid: u32, steamid: u64) -> Self {
        let mut extra = serde_json::Map::new();
        extra.insert("error".to_string(), "Profile is not public".into());
        extra.insert("success".to_string(), false.into());
        self.stats.insert(
            (appid, steamid),
            PlayerStats {
                steam_id: None,
                game_name: None,
                achievements: Vec::new(),
                extra,
            },
        );
        self
    }

    pub fn with_vanity(mut self, name: &str, steamid: u64) -> Self {
        self.vanity.insert(name.to_string(), steamid);
        self
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn detail_fetches(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn schema_fetches(&self) -> usize {
        self.schema_calls.load(Ordering::SeqCst)
    }

    pub fn stats_fetches(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ScoutError::api(503, "Service Unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl SteamApi for FakeSteam {
    async fn app_details(&self, appid: u32) -> Result<Option<AppDetails>> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.details.get(&appid).cloned())
    }

    async fn achievement_schema(&self, appid: u32) -> Result<Option<Vec<Achievement>>> {
        self.schema_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        if self.schema_failing.load(Ordering::SeqCst) {
            return Err(ScoutError::api(500, "Internal Server Error"));
        }
        Ok(self.schemas.get(&appid).cloned())
    }

    async fn user_stats(&self, appid: u32, steamid: u64) -> Result<Option<PlayerStats>> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.stats.get(&(appid, steamid)).cloned())
    }

    async fn resolve_vanity(&self, name: &str) -> Result<Option<u64>> {
        self.check()?;
        Ok(self.vanity.get(name).copied())
    }
}
