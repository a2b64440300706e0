use crate::cli::args::{OutputFormat, SearchArgs};
use crate::error::{Result, ScoutError};
use crate::handler::{AppHandler, MAX_SEARCH_LEN};
use crate::output;

/// Handle the search command
pub async fn search(handler: &AppHandler, args: &SearchArgs, format: OutputFormat) -> Result<String> {
    let results = handler.search(&args.text).await.ok_or_else(|| {
        ScoutError::InvalidArgument(format!(
            "search text is longer than {MAX_SEARCH_LEN} characters"
        ))
    })?;

    output::format_search(&results, format)
}
