use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use super::{escape_like, AppSummary, Catalog, GAME_TYPE, INVALID_TYPE};
use crate::config::DatabaseConfig;
use crate::error::Result;

/// Name/id match restricted to games, closest names first then alphabetical
///
/// Placeholders in order: LIKE pattern, exact id text, kind, ranking text, limit.
const SEARCH_QUERY: &str = "SELECT CAST(appid AS SIGNED) AS appid, name, type, header_image, background \
     FROM appinfo \
     WHERE (name LIKE ? OR CAST(appid AS CHAR) = ?) AND type = ? \
     ORDER BY CHAR_LENGTH(REPLACE(name, ?, '')) ASC, name ASC \
     LIMIT ?";

const COUNT_VALID_QUERY: &str = "SELECT COUNT(*) FROM appinfo WHERE appid = ? AND type <> ?";

/// Catalog backed by the MySQL `appinfo` table
#[derive(Clone)]
pub struct MySqlCatalog {
    pool: MySqlPool,
}

impl MySqlCatalog {
    /// Connect a pool using the database configuration
    pub async fn connect(config: &DatabaseConfig, url: &str) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(url)
            .await?;

        tracing::debug!(max_connections = config.max_connections, "catalog pool connected");
        Ok(Self { pool })
    }
}

/// Text parameters of [`SEARCH_QUERY`], in placeholder order; the limit follows
fn search_binds(text: &str) -> [String; 4] {
    [
        format!("%{}%", escape_like(text)),
        text.to_string(),
        GAME_TYPE.to_string(),
        text.to_string(),
    ]
}

#[async_trait]
impl Catalog for MySqlCatalog {
    async fn search(&self, text: &str, limit: u32) -> Result<Vec<AppSummary>> {
        let [pattern, id_text, kind, rank_text] = search_binds(text);

        let rows = sqlx::query_as::<_, AppSummary>(SEARCH_QUERY)
            .bind(pattern)
            .bind(id_text)
            .bind(kind)
            .bind(rank_text)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn count_valid(&self, appid: u32) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(COUNT_VALID_QUERY)
            .bind(appid)
            .bind(INVALID_TYPE)
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }
}
