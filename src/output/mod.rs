pub mod json;
pub mod pretty;

use crate::catalog::AppSummary;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::steam::{AppInfo, PlayerStats};

/// Format search results based on output format
pub fn format_search(results: &[AppSummary], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_search(results)),
        OutputFormat::Json => json::format_search(results),
    }
}

/// Format app info based on output format
pub fn format_app_info(info: &AppInfo, show_achievements: bool, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_app_info(info, show_achievements)),
        OutputFormat::Json if show_achievements => json::format_app_info(info),
        OutputFormat::Json => {
            let mut trimmed = info.clone();
            trimmed.achievements = None;
            json::format_app_info(&trimmed)
        }
    }
}

/// Format a user's progress based on output format
pub fn format_user_stats(stats: &PlayerStats, locked_only: bool, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_user_stats(stats, locked_only)),
        OutputFormat::Json if locked_only => {
            let mut locked = stats.clone();
            locked.achievements.retain(|a| !a.achieved);
            json::format_user_stats(&locked)
        }
        OutputFormat::Json => json::format_user_stats(stats),
    }
}

/// Format a resolved Steam id based on output format
pub fn format_steam_id(name: &str, steamid: u64, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_steam_id(name, steamid)),
        OutputFormat::Json => json::format_steam_id(name, steamid),
    }
}
