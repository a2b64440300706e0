use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::types::*;
use super::SteamApi;
use crate::config::SteamConfig;
use crate::error::{Result, ScoutError};

pub const STORE_URL: &str = "https://store.steampowered.com";
pub const API_URL: &str = "https://api.steampowered.com";
const USER_AGENT: &str = concat!("steamscout/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Longest error body kept in an API error message
const MAX_ERROR_BODY: usize = 200;

/// Steam store and Web API client
pub struct SteamClient {
    client: Client,
    api_key: String,
    store_url: String,
    api_url: String,
}

impl SteamClient {
    /// Create a new client from configuration
    pub fn new(config: &SteamConfig, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            store_url: config.store_url.clone(),
            api_url: config.api_url.clone(),
        })
    }

    /// Create a new client with an explicit key and the public endpoints
    pub fn with_key(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            store_url: STORE_URL.to_string(),
            api_url: API_URL.to_string(),
        })
    }

    /// Point the client at different store and Web API hosts
    pub fn with_base_urls(mut self, store_url: impl Into<String>, api_url: impl Into<String>) -> Self {
        self.store_url = store_url.into();
        self.api_url = api_url.into();
        self
    }

    /// Make a GET request and decode the JSON body
    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        base: &str,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = Url::parse_with_params(&format!("{base}{path}"), params)
            .map_err(|e| ScoutError::InvalidArgument(format!("Invalid Steam URL {base}{path}: {e}")))?;

        // The query carries the API key, so strip URLs from transport errors
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScoutError::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let message: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(MAX_ERROR_BODY)
                .collect();
            return Err(ScoutError::api(status.as_u16(), message));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScoutError::Http(e.without_url()))?;
        serde_json::from_str(&body).map_err(ScoutError::Json)
    }
}

#[async_trait]
impl SteamApi for SteamClient {
    async fn app_details(&self, appid: u32) -> Result<Option<AppDetails>> {
        let mut response: AppDetailsResponse = self
            .get(
                &self.store_url,
                "/api/appdetails",
                &[("appids", appid.to_string()), ("l", "english".to_string())],
            )
            .await?;

        Ok(response
            .remove(&appid.to_string())
            .and_then(|entry| entry.data))
    }

    async fn achievement_schema(&self, appid: u32) -> Result<Option<Vec<Achievement>>> {
        let response: SchemaResponse = self
            .get(
                &self.api_url,
                "/ISteamUserStats/GetSchemaForGame/v2/",
                &[("key", self.api_key.clone()), ("appid", appid.to_string())],
            )
            .await?;

        Ok(response.into_achievements())
    }

    async fn user_stats(&self, appid: u32, steamid: u64) -> Result<Option<PlayerStats>> {
        let response: UserStatsResponse = self
            .get(
                &self.api_url,
                "/ISteamUserStats/GetUserStatsForGame/v2/",
                &[
                    ("appid", appid.to_string()),
                    ("key", self.api_key.clone()),
                    ("steamid", steamid.to_string()),
                ],
            )
            .await?;

        Ok(response.playerstats.filter(|stats| !stats.is_error_document()))
    }

    async fn resolve_vanity(&self, name: &str) -> Result<Option<u64>> {
        let response: VanityResponse = self
            .get(
                &self.api_url,
                "/ISteamUser/ResolveVanityURL/v0001/",
                &[("key", self.api_key.clone()), ("vanityurl", name.to_string())],
            )
            .await?;

        if response.response.success != 1 {
            return Ok(None);
        }

        Ok(response
            .response
            .steamid
            .and_then(|id| id.parse::<u64>().ok()))
    }
}
