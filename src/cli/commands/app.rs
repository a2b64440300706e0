use crate::cli::args::{AppArgs, OutputFormat};
use crate::error::{Result, ScoutError};
use crate::handler::AppHandler;
use crate::output;

/// Handle the app command
pub async fn app(handler: &AppHandler, args: &AppArgs, format: OutputFormat) -> Result<String> {
    let info = handler
        .get_app_info(&args.appid)
        .await
        .ok_or_else(|| ScoutError::AppNotFound(args.appid.clone()))?;

    output::format_app_info(&info, !args.no_achievements, format)
}
