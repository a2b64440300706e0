use std::path::Path;

use async_trait::async_trait;

use super::{match_rank, AppSummary, Catalog, GAME_TYPE, INVALID_TYPE};
use crate::error::Result;

/// Catalog held in memory, loaded from a JSON array of rows
///
/// Matches names case-insensitively and ranks with [`match_rank`], the same
/// ordering the MySQL catalog asks the database for.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    rows: Vec<AppSummary>,
}

impl MemoryCatalog {
    pub fn new(rows: Vec<AppSummary>) -> Self {
        Self { rows }
    }

    /// Load rows from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let rows: Vec<AppSummary> = serde_json::from_str(&data)?;
        tracing::debug!(rows = rows.len(), path = %path.display(), "loaded catalog file");
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn search(&self, text: &str, limit: u32) -> Result<Vec<AppSummary>> {
        let needle = text.to_lowercase();

        let mut matches: Vec<&AppSummary> = self
            .rows
            .iter()
            .filter(|row| row.app_type == GAME_TYPE)
            .filter(|row| row.name.to_lowercase().contains(&needle) || row.appid.to_string() == text)
            .collect();

        matches.sort_by(|a, b| {
            match_rank(&a.name, text)
                .cmp(&match_rank(&b.name, text))
                .then_with(|| a.name.cmp(&b.name))
        });

        Ok(matches
            .into_iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count_valid(&self, appid: u32) -> Result<u64> {
        let count = self
            .rows
            .iter()
            .filter(|row| row.appid == appid && row.app_type != INVALID_TYPE)
            .count();
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(appid: u32, name: &str, app_type: &str) -> AppSummary {
        AppSummary {
            appid,
            name: name.to_string(),
            app_type: app_type.to_string(),
            header_image: None,
            background: None,
        }
    }

    fn half_life_catalog() -> MemoryCatalog {
        MemoryCatalog::new(vec![
            row(3, "The Half-Life Experience", "game"),
            row(220, "Half-Life 2", "game"),
            row(70, "Half-Life", "game"),
            row(71, "Half-Life Soundtrack", "music"),
            row(440, "Team Fortress 2", "game"),
        ])
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_search_ranks_exact_match_first() {
        let catalog = half_life_catalog();
        let results = catalog.search("Half-Life", 30).await.unwrap();

        let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Half-Life", "Half-Life 2", "The Half-Life Experience"]
        );
    }

    #[tokio::test]
    async fn test_search_ranks_mostly_matching_name_above_alphabetical_neighbour() {
        let catalog = MemoryCatalog::new(vec![
            row(1, "Aaa Portal Collection Deluxe", "game"),
            row(2, "Portal", "game"),
        ]);
        let results = catalog.search("Portal", 30).await.unwrap();
        assert_eq!(results[0].appid, 2);
    }

    #[tokio::test]
    async fn test_search_only_returns_games() {
        let catalog = half_life_catalog();
        let results = catalog.search("Soundtrack", 30).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_matches_exact_appid() {
        let catalog = half_life_catalog();
        let results = catalog.search("440", 30).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Team Fortress 2");
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let catalog = half_life_catalog();
        let results = catalog.search("team fortress", 30).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_search_respects_limit() {
        let catalog = half_life_catalog();
        let results = catalog.search("Half", 2).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation Count Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_count_valid_excludes_invalid_kind() {
        let catalog = MemoryCatalog::new(vec![row(10, "Broken", "invalid"), row(70, "Half-Life", "game")]);

        assert_eq!(catalog.count_valid(70).await.unwrap(), 1);
        assert_eq!(catalog.count_valid(10).await.unwrap(), 0);
        assert_eq!(catalog.count_valid(999).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_count_valid_accepts_non_game_kinds() {
        let catalog = half_life_catalog();
        assert_eq!(catalog.count_valid(71).await.unwrap(), 1);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // File Loading Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_from_file_loads_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[{"appid": 70, "name": "Half-Life", "type": "game"},
                {"appid": 10, "name": "Counter-Strike", "type": "game", "header_image": "https://example.com/h.jpg"}]"#,
        )
        .unwrap();

        let catalog = MemoryCatalog::from_file(&path).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_from_file_with_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");
        std::fs::write(&path, "invalid json").unwrap();

        assert!(MemoryCatalog::from_file(&path).is_err());
    }
}
