use crate::cli::args::{OutputFormat, UserArgs};
use crate::error::{Result, ScoutError};
use crate::handler::AppHandler;
use crate::output;

/// Handle the user command
pub async fn user(handler: &AppHandler, args: &UserArgs, format: OutputFormat) -> Result<String> {
    let stats = handler
        .get_user_info(&args.appid, &args.steamid)
        .await
        .ok_or_else(|| ScoutError::StatsUnavailable {
            appid: args.appid.clone(),
            steamid: args.steamid.clone(),
        })?;

    output::format_user_stats(&stats, args.locked, format)
}
