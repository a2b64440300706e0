use thiserror::Error;

/// Result type alias for Steamscout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Errors that can occur during Steamscout operations
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing required configuration
    #[error("{0}")]
    ConfigMissing(String),

    /// API error with HTTP status
    #[error("Steam API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog query failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// TOML parsing error
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to write config file: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A fetch did not finish within the configured limit
    #[error("{0} timed out after {1}s")]
    Timeout(&'static str, u64),

    /// App not found or not available
    #[error("App not found: {0}")]
    AppNotFound(String),

    /// User stats unavailable (private profile, unplayed app, or invalid id)
    #[error("Achievement progress not available for app {appid} and user {steamid}")]
    StatsUnavailable { appid: String, steamid: String },

    /// Vanity name did not resolve
    #[error("No Steam profile found for: {0}")]
    ProfileNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Environment variable error
    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),
}

impl ScoutError {
    /// Create an API error from HTTP status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a config missing error with helpful message
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::ConfigMissing(message.into())
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::ConfigMissing(_) | Self::Toml(_) | Self::TomlSerialize(_) => 2,
            Self::InvalidArgument(_) => 3,
            Self::AppNotFound(_) | Self::StatsUnavailable { .. } | Self::ProfileNotFound(_) => 4,
            Self::Api { .. } | Self::Http(_) | Self::Json(_) | Self::Timeout(..) => 5,
            Self::Database(_) => 6,
            Self::Io(_) | Self::Env(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ScoutError::api(403, "Forbidden");
        assert_eq!(err.to_string(), "Steam API error (HTTP 403): Forbidden");
    }

    #[test]
    fn test_timeout_display() {
        let err = ScoutError::Timeout("app details", 20);
        assert_eq!(err.to_string(), "app details timed out after 20s");
    }

    #[test]
    fn test_exit_codes_distinguish_categories() {
        assert_eq!(ScoutError::config_missing("x").exit_code(), 2);
        assert_eq!(ScoutError::InvalidArgument("x".into()).exit_code(), 3);
        assert_eq!(ScoutError::AppNotFound("10".into()).exit_code(), 4);
        assert_eq!(ScoutError::api(500, "x").exit_code(), 5);
    }
}
