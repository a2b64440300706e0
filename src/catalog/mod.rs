//! Application catalog backing store
//!
//! The catalog is a read-only table of Steam applications (`appinfo`) used for
//! name search and for cheap identifier validation before any Steam API call.

mod memory;
mod mysql;

pub use memory::MemoryCatalog;
pub use mysql::MySqlCatalog;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Kind of application returned by name search
pub const GAME_TYPE: &str = "game";

/// Kind marking catalog rows that must never reach the Steam API
pub const INVALID_TYPE: &str = "invalid";

/// Default number of search rows returned
pub const DEFAULT_SEARCH_LIMIT: u32 = 30;

/// Search result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AppSummary {
    /// Selected as a signed BIGINT so signed and unsigned `appid` columns both decode
    #[sqlx(try_from = "i64")]
    pub appid: u32,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub app_type: String,
    #[serde(default)]
    pub header_image: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
}

/// Read access to the application catalog
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Games whose name contains `text` or whose id equals `text`, best match first
    async fn search(&self, text: &str, limit: u32) -> Result<Vec<AppSummary>>;

    /// Number of rows with this id whose kind is not [`INVALID_TYPE`]
    async fn count_valid(&self, appid: u32) -> Result<u64>;
}

/// Sort key for a name matched against a search string
///
/// Ranks by how many characters remain once every occurrence of the query is
/// removed, so an exact name sorts before a longer name containing it. Ties
/// are broken alphabetically by the caller.
///
/// A row matched only by its exact app id has nothing removed from its name,
/// so it ranks by its full name length among the name matches rather than
/// ahead of them.
pub fn match_rank(name: &str, query: &str) -> usize {
    if query.is_empty() {
        return name.chars().count();
    }
    name.replace(query, "").chars().count()
}

/// Escape `LIKE` metacharacters so `text` matches literally
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
