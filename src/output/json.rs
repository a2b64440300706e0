use serde::Serialize;

use crate::catalog::AppSummary;
use crate::error::Result;
use crate::steam::{AppInfo, PlayerStats};

/// Format search results as JSON
pub fn format_search(results: &[AppSummary]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Format compiled app info as JSON
pub fn format_app_info(info: &AppInfo) -> Result<String> {
    Ok(serde_json::to_string_pretty(info)?)
}

/// Format user progress as JSON, keeping Steam's field names
pub fn format_user_stats(stats: &PlayerStats) -> Result<String> {
    Ok(serde_json::to_string_pretty(stats)?)
}

/// Format a resolved Steam id as JSON
///
/// The id is a string: it does not fit in a double.
pub fn format_steam_id(name: &str, steamid: u64) -> Result<String> {
    let result = serde_json::json!({
        "name": name,
        "steamid": steamid.to_string()
    });
    Ok(serde_json::to_string_pretty(&result)?)
}

/// Format any serializable value as JSON
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
