mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{
    CacheConfig, Config, DatabaseConfig, LimitsConfig, OutputConfig, ServerConfig, SteamConfig,
    SETTABLE_KEYS,
};
