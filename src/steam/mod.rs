mod client;
pub mod types;

pub use client::{SteamClient, API_URL, STORE_URL};
pub use types::*;

use async_trait::async_trait;

use crate::error::Result;

/// Steam store and Web API lookups
///
/// `Ok(None)` means Steam answered but had nothing for the request; `Err`
/// is a transport, status or decoding failure.
#[async_trait]
pub trait SteamApi: Send + Sync {
    /// Store details for an app
    async fn app_details(&self, appid: u32) -> Result<Option<AppDetails>>;

    /// Achievement schema for an app
    async fn achievement_schema(&self, appid: u32) -> Result<Option<Vec<Achievement>>>;

    /// A user's achievement progress in an app
    async fn user_stats(&self, appid: u32, steamid: u64) -> Result<Option<PlayerStats>>;

    /// Resolve a profile vanity name to a 64-bit Steam id
    async fn resolve_vanity(&self, name: &str) -> Result<Option<u64>>;
}
