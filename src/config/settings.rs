use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use super::paths::Paths;
use crate::catalog::DEFAULT_SEARCH_LIMIT;
use crate::error::{Result, ScoutError};
use crate::steam::{API_URL, STORE_URL};

/// Keys accepted by [`Config::set_value`]
pub const SETTABLE_KEYS: &[&str] = &[
    "steam.api_key",
    "steam.store_url",
    "steam.api_url",
    "steam.timeout_secs",
    "database.url",
    "database.max_connections",
    "database.acquire_timeout_secs",
    "database.catalog_file",
    "cache.app_info_ttl_minutes",
    "cache.search_ttl_minutes",
    "cache.user_info_ttl_minutes",
    "cache.validity_ttl_minutes",
    "limits.fetch_timeout_secs",
    "limits.search_limit",
    "server.host",
    "server.port",
    "output.format",
];

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Steam API configuration
    #[serde(default)]
    pub steam: SteamConfig,

    /// Catalog database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Cache expiry windows
    #[serde(default)]
    pub cache: CacheConfig,

    /// Fetch limits
    #[serde(default)]
    pub limits: LimitsConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Output preferences
    #[serde(default)]
    pub output: OutputConfig,
}

/// Steam-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SteamConfig {
    /// Steam Web API key
    pub api_key: Option<String>,
    /// Store API base URL
    pub store_url: String,
    /// Web API base URL
    pub api_url: String,
    /// HTTP client timeout
    pub timeout_secs: u64,
}

impl Default for SteamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            store_url: STORE_URL.to_string(),
            api_url: API_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Catalog database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// MySQL connection URL
    pub url: Option<String>,
    pub max_connections: u32,
    /// How long a query waits for a free pooled connection
    pub acquire_timeout_secs: u64,
    /// JSON catalog to use instead of MySQL
    pub catalog_file: Option<PathBuf>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            acquire_timeout_secs: 10,
            catalog_file: None,
        }
    }
}

/// Cache TTLs in minutes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub app_info_ttl_minutes: u64,
    pub search_ttl_minutes: u64,
    /// Must stay shorter than `app_info_ttl_minutes`: progress changes during play
    pub user_info_ttl_minutes: u64,
    pub validity_ttl_minutes: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            app_info_ttl_minutes: 60,
            search_ttl_minutes: 60,
            user_info_ttl_minutes: 10,
            validity_ttl_minutes: 24 * 60,
        }
    }
}

/// Bounds on individual fetches
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub fetch_timeout_secs: u64,
    /// Maximum rows returned by a search
    pub search_limit: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 20,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Output formatting preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let paths = Paths::new()?;
        Self::load_from(&paths)
    }

    /// Load configuration from a specific paths instance
    pub fn load_from(paths: &Paths) -> Result<Self> {
        if !paths.config_exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&paths.config_file)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let paths = Paths::new()?;
        self.save_to(&paths)
    }

    /// Save configuration to a specific paths instance
    pub fn save_to(&self, paths: &Paths) -> Result<()> {
        paths.ensure_dirs()?;
        let contents = toml::to_string_pretty(self)?;
        fs::write(&paths.config_file, &contents)?;

        // Restrictive permissions: the file holds the Steam API key
        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&paths.config_file, perms)?;
        }

        Ok(())
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        if self.cache.user_info_ttl_minutes >= self.cache.app_info_ttl_minutes {
            return Err(ScoutError::Config(format!(
                "cache.user_info_ttl_minutes ({}) must be shorter than cache.app_info_ttl_minutes ({})",
                self.cache.user_info_ttl_minutes, self.cache.app_info_ttl_minutes
            )));
        }
        if self.limits.search_limit == 0 {
            return Err(ScoutError::Config(
                "limits.search_limit must be at least 1".to_string(),
            ));
        }
        if self.limits.fetch_timeout_secs == 0 {
            return Err(ScoutError::Config(
                "limits.fetch_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the API key or return an error with instructions
    pub fn require_api_key(&self) -> Result<&str> {
        self.steam.api_key.as_deref().ok_or_else(|| {
            ScoutError::config_missing(
                "Steam API key not configured. Run 'steamscout config init' or set STEAM_API_KEY.",
            )
        })
    }

    /// Get the database URL or return an error with instructions
    pub fn require_database_url(&self) -> Result<&str> {
        self.database.url.as_deref().ok_or_else(|| {
            ScoutError::config_missing(
                "No catalog configured. Set DATABASE_URL, 'database.url' or 'database.catalog_file'.",
            )
        })
    }

    /// Set the API key
    pub fn set_api_key(&mut self, key: String) {
        self.steam.api_key = Some(key);
    }

    /// Set a value by dotted key, then re-check constraints
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "steam.api_key" => self.set_api_key(value.to_string()),
            "steam.store_url" => self.steam.store_url = value.to_string(),
            "steam.api_url" => self.steam.api_url = value.to_string(),
            "steam.timeout_secs" => self.steam.timeout_secs = parse_number(key, value)?,
            "database.url" => self.database.url = Some(value.to_string()),
            "database.max_connections" => self.database.max_connections = parse_number(key, value)?,
            "database.acquire_timeout_secs" => {
                self.database.acquire_timeout_secs = parse_number(key, value)?
            }
            "database.catalog_file" => self.database.catalog_file = Some(PathBuf::from(value)),
            "cache.app_info_ttl_minutes" => self.cache.app_info_ttl_minutes = parse_number(key, value)?,
            "cache.search_ttl_minutes" => self.cache.search_ttl_minutes = parse_number(key, value)?,
            "cache.user_info_ttl_minutes" => {
                self.cache.user_info_ttl_minutes = parse_number(key, value)?
            }
            "cache.validity_ttl_minutes" => {
                self.cache.validity_ttl_minutes = parse_number(key, value)?
            }
            "limits.fetch_timeout_secs" => self.limits.fetch_timeout_secs = parse_number(key, value)?,
            "limits.search_limit" => self.limits.search_limit = parse_number(key, value)?,
            "server.host" => self.server.host = value.to_string(),
            "server.port" => self.server.port = parse_number(key, value)?,
            "output.format" => {
                if value != "pretty" && value != "json" {
                    return Err(ScoutError::InvalidArgument(
                        "output.format must be 'pretty' or 'json'".to_string(),
                    ));
                }
                self.output.format = value.to_string();
            }
            _ => {
                return Err(ScoutError::InvalidArgument(format!(
                    "Unknown config key: {}. Valid keys: {}",
                    key,
                    SETTABLE_KEYS.join(", ")
                )));
            }
        }

        self.validate()
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| ScoutError::InvalidArgument(format!("{key} expects a number, got '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Create a test Paths instance using a temp directory
    fn make_test_paths(temp_dir: &TempDir) -> Paths {
        Paths::in_dir(temp_dir.path().to_path_buf())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Default Value Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.steam.api_key.is_none());
        assert_eq!(config.steam.store_url, STORE_URL);
        assert!(config.database.url.is_none());
        assert_eq!(config.cache.app_info_ttl_minutes, 60);
        assert_eq!(config.cache.user_info_ttl_minutes, 10);
        assert_eq!(config.limits.search_limit, 30);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.output.format, "pretty");
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Load/Save Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_load_returns_default_when_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        let config = Config::load_from(&paths).unwrap();
        assert!(config.steam.api_key.is_none());
        assert_eq!(config.output.format, "pretty");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        let mut config = Config::default();
        config.set_api_key("ABCDEF0123456789".to_string());
        config.database.url = Some("mysql://scout@localhost/steam".to_string());
        config.cache.user_info_ttl_minutes = 5;
        config.output.format = "json".to_string();

        config.save_to(&paths).unwrap();

        let loaded = Config::load_from(&paths).unwrap();
        assert_eq!(loaded.steam.api_key.as_deref(), Some("ABCDEF0123456789"));
        assert_eq!(loaded.database.url.as_deref(), Some("mysql://scout@localhost/steam"));
        assert_eq!(loaded.cache.user_info_ttl_minutes, 5);
        assert_eq!(loaded.output.format, "json");
    }

    #[test]
    fn test_load_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        fs::create_dir_all(&paths.root).unwrap();
        fs::write(
            &paths.config_file,
            r#"
[steam]
api_key = "partial-key"

[cache]
search_ttl_minutes = 5
"#,
        )
        .unwrap();

        let config = Config::load_from(&paths).unwrap();
        assert_eq!(config.steam.api_key.as_deref(), Some("partial-key"));
        assert_eq!(config.steam.api_url, API_URL);
        assert_eq!(config.cache.search_ttl_minutes, 5);
        assert_eq!(config.cache.app_info_ttl_minutes, 60);
    }

    #[test]
    fn test_load_empty_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        fs::create_dir_all(&paths.root).unwrap();
        fs::write(&paths.config_file, "").unwrap();

        let config = Config::load_from(&paths).unwrap();
        assert!(config.steam.api_key.is_none());
        assert_eq!(config.output.format, "pretty");
    }

    #[test]
    fn test_load_rejects_user_ttl_not_shorter_than_app_ttl() {
        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        fs::create_dir_all(&paths.root).unwrap();
        fs::write(
            &paths.config_file,
            "[cache]\napp_info_ttl_minutes = 10\nuser_info_ttl_minutes = 10\n",
        )
        .unwrap();

        let err = Config::load_from(&paths).unwrap_err();
        assert!(err.to_string().contains("must be shorter"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Require Methods Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_require_api_key_when_present() {
        let mut config = Config::default();
        config.set_api_key("my-key".to_string());
        assert_eq!(config.require_api_key().unwrap(), "my-key");
    }

    #[test]
    fn test_require_api_key_when_missing() {
        let err = Config::default().require_api_key().unwrap_err();
        assert!(err.to_string().contains("Steam API key not configured"));
    }

    #[test]
    fn test_require_database_url_when_missing() {
        let err = Config::default().require_database_url().unwrap_err();
        assert!(err.to_string().contains("No catalog configured"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Set Value Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_set_value_numbers_and_strings() {
        let mut config = Config::default();
        config.set_value("server.port", "8080").unwrap();
        config.set_value("database.catalog_file", "/srv/catalog.json").unwrap();
        config.set_value("limits.search_limit", "60").unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.catalog_file, Some(PathBuf::from("/srv/catalog.json")));
        assert_eq!(config.limits.search_limit, 60);
    }

    #[test]
    fn test_set_value_rejects_non_number() {
        let mut config = Config::default();
        let err = config.set_value("server.port", "eighty").unwrap_err();
        assert!(err.to_string().contains("expects a number"));
    }

    #[test]
    fn test_set_value_rejects_unknown_key() {
        let mut config = Config::default();
        let err = config.set_value("nope.key", "1").unwrap_err();
        assert!(err.to_string().contains("Unknown config key"));
    }

    #[test]
    fn test_set_value_rejects_bad_format() {
        let mut config = Config::default();
        assert!(config.set_value("output.format", "yaml").is_err());
        assert!(config.set_value("output.format", "json").is_ok());
    }

    #[test]
    fn test_set_value_enforces_ttl_ordering() {
        let mut config = Config::default();
        assert!(config.set_value("cache.user_info_ttl_minutes", "90").is_err());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // File Permissions Tests (Unix only)
    // ─────────────────────────────────────────────────────────────────────────

    #[cfg(unix)]
    #[test]
    fn test_save_sets_restrictive_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let paths = make_test_paths(&temp_dir);

        let mut config = Config::default();
        config.set_api_key("secret-key".to_string());
        config.save_to(&paths).unwrap();

        let metadata = fs::metadata(&paths.config_file).unwrap();
        let mode = metadata.permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "Config file should have 0600 permissions");
    }
}
