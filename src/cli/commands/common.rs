//! Collaborator construction shared across CLI commands

use std::sync::Arc;

use crate::catalog::{Catalog, MemoryCatalog, MySqlCatalog};
use crate::config::Config;
use crate::error::Result;
use crate::handler::AppHandler;
use crate::steam::SteamClient;

/// Which collaborators a command needs configured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRequirement {
    /// Store lookups and catalog search work without a key
    Optional,
    /// Schema, user stats and vanity lookups need a Web API key
    Required,
}

/// Open the configured catalog
///
/// A `database.catalog_file` takes precedence over the MySQL URL.
pub async fn open_catalog(config: &Config) -> Result<Arc<dyn Catalog>> {
    if let Some(ref path) = config.database.catalog_file {
        return Ok(Arc::new(MemoryCatalog::from_file(path)?));
    }

    let url = config.require_database_url()?;
    let catalog = MySqlCatalog::connect(&config.database, url).await?;
    Ok(Arc::new(catalog))
}

/// Create a Steam client from configuration
pub fn steam_client(config: &Config, requirement: KeyRequirement) -> Result<SteamClient> {
    let key = match requirement {
        KeyRequirement::Required => config.require_api_key()?,
        KeyRequirement::Optional => config.steam.api_key.as_deref().unwrap_or_default(),
    };
    SteamClient::new(&config.steam, key)
}

/// Wire a handler over the configured catalog and Steam client
pub async fn build_handler(config: &Config, requirement: KeyRequirement) -> Result<AppHandler> {
    let catalog = open_catalog(config).await?;
    let steam = Arc::new(steam_client(config, requirement)?);
    Ok(AppHandler::new(catalog, steam, &config.cache, &config.limits))
}

/// Mask a secret for display, keeping the first and last four characters
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "****".to_string()
    }
}
