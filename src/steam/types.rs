use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Store API: appdetails
// ─────────────────────────────────────────────────────────────────────────────

/// Response of `store/api/appdetails`, keyed by the requested app id
pub type AppDetailsResponse = HashMap<String, AppDetailsEntry>;

/// Per-app envelope; `data` is absent for unknown or unsold apps
#[derive(Debug, Clone, Deserialize)]
pub struct AppDetailsEntry {
    #[serde(default)]
    pub success: bool,
    pub data: Option<AppDetails>,
}

/// Store metadata for an app
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppDetails {
    pub name: Option<String>,
    pub website: Option<String>,
    #[serde(rename = "type")]
    pub app_type: Option<String>,
    pub header_image: Option<String>,
    pub is_free: Option<bool>,
    pub legal_notice: Option<String>,
    pub about_the_game: Option<String>,
    pub background: Option<String>,
    pub background_raw: Option<String>,
    pub short_description: Option<String>,
    pub detailed_description: Option<String>,
    pub controller_support: Option<String>,
    pub price_overview: Option<PriceOverview>,
    pub release_date: Option<ReleaseDate>,
    pub supported_languages: Option<String>,
    pub developers: Option<Vec<String>>,
    pub publishers: Option<Vec<String>>,
    pub dlc: Option<Vec<u32>>,
    pub platforms: Option<Platforms>,
    pub support_info: Option<SupportInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceOverview {
    pub currency: Option<String>,
    pub initial: Option<i64>,
    #[serde(rename = "final")]
    pub final_price: Option<i64>,
    pub discount_percent: Option<i64>,
    pub initial_formatted: Option<String>,
    pub final_formatted: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseDate {
    pub coming_soon: bool,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platforms {
    pub windows: bool,
    pub mac: bool,
    pub linux: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportInfo {
    pub url: Option<String>,
    pub email: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// ISteamUserStats/GetSchemaForGame
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaResponse {
    pub game: Option<SchemaGame>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaGame {
    #[serde(rename = "availableGameStats")]
    pub available_game_stats: Option<AvailableGameStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailableGameStats {
    pub achievements: Option<Vec<Achievement>>,
}

impl SchemaResponse {
    /// The nested achievement list, if the app exposes one
    pub fn into_achievements(self) -> Option<Vec<Achievement>> {
        self.game?.available_game_stats?.achievements
    }
}

/// Achievement definition from the game schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub icongray: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub hidden: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// ISteamUserStats/GetUserStatsForGame
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserStatsResponse {
    pub playerstats: Option<PlayerStats>,
}

/// A user's progress in one app
///
/// Fields other than the achievement list are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    #[serde(rename = "steamID", default)]
    pub steam_id: Option<String>,
    #[serde(rename = "gameName", default)]
    pub game_name: Option<String>,
    #[serde(default)]
    pub achievements: Vec<UserAchievement>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PlayerStats {
    /// Whether this is Steam's error or empty document rather than progress
    ///
    /// Private profiles and unknown users come back as `200` with
    /// `{"error": .., "success": false}` or an empty object.
    pub fn is_error_document(&self) -> bool {
        let has_error = self.extra.contains_key("error");
        let failed = matches!(self.extra.get("success"), Some(serde_json::Value::Bool(false)));
        let empty = self.steam_id.is_none() && self.achievements.is_empty();
        has_error || failed || empty
    }

    /// Number of achievements the user has unlocked
    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.achieved).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAchievement {
    pub name: String,
    #[serde(default, deserialize_with = "flag")]
    pub achieved: bool,
    #[serde(rename = "unlocktime", default)]
    pub unlock_time: Option<i64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// ISteamUser/ResolveVanityURL
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct VanityResponse {
    pub response: VanityResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VanityResult {
    pub success: i32,
    #[serde(default)]
    pub steamid: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Compiled record
// ─────────────────────────────────────────────────────────────────────────────

/// Store details and achievement schema for one app
///
/// Every optional field is serialized, as `null` when unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppInfo {
    pub appid: u32,
    pub name: Option<String>,
    pub website: Option<String>,
    #[serde(rename = "type")]
    pub app_type: Option<String>,
    pub header_image: Option<String>,
    pub is_free: Option<bool>,
    pub legal_notice: Option<String>,
    pub about_the_game: Option<String>,
    pub background: Option<String>,
    pub background_raw: Option<String>,
    pub short_description: Option<String>,
    pub detailed_description: Option<String>,
    pub controller_support: Option<String>,
    pub price_overview: Option<PriceOverview>,
    pub release_date: Option<ReleaseDate>,
    pub supported_languages: Option<String>,
    pub developers: Option<Vec<String>>,
    pub publishers: Option<Vec<String>>,
    pub dlc: Option<Vec<u32>>,
    pub platforms: Option<Platforms>,
    pub support_info: Option<SupportInfo>,
    pub achievements: Option<Vec<Achievement>>,
}

impl AppInfo {
    /// Combine store details with an optional achievement schema
    pub fn compile(appid: u32, details: AppDetails, achievements: Option<Vec<Achievement>>) -> Self {
        Self {
            appid,
            name: details.name,
            website: details.website,
            app_type: details.app_type,
            header_image: details.header_image,
            is_free: details.is_free,
            legal_notice: details.legal_notice,
            about_the_game: details.about_the_game,
            background: details.background,
            background_raw: details.background_raw,
            short_description: details.short_description,
            detailed_description: details.detailed_description,
            controller_support: details.controller_support,
            price_overview: details.price_overview,
            release_date: details.release_date,
            supported_languages: details.supported_languages,
            developers: details.developers,
            publishers: details.publishers,
            dlc: details.dlc,
            platforms: details.platforms,
            support_info: details.support_info,
            achievements,
        }
    }
}

/// Steam encodes flags as 0/1 in some endpoints and as booleans in others
fn flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
    })
}
