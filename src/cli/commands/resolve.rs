use crate::cli::args::{OutputFormat, ResolveArgs};
use crate::error::{Result, ScoutError};
use crate::output;
use crate::steam::SteamApi;

/// Handle the resolve command
///
/// Talks to Steam directly: no catalog is needed and failures are reported
/// rather than folded into "not found".
pub async fn resolve(steam: &dyn SteamApi, args: &ResolveArgs, format: OutputFormat) -> Result<String> {
    let steamid = steam
        .resolve_vanity(&args.name)
        .await?
        .ok_or_else(|| ScoutError::ProfileNotFound(args.name.clone()))?;

    output::format_steam_id(&args.name, steamid, format)
}
