use std::io::{self, Write};

use colored::Colorize;

use super::common::mask_secret;
use crate::cli::args::{ConfigArgs, ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::{Result, ScoutError};
use crate::output::json;

/// Handle the config command
pub fn config(config: &mut Config, args: &ConfigArgs, format: OutputFormat) -> Result<String> {
    match &args.command {
        ConfigCommands::Show => config_show(config, format),
        ConfigCommands::Set { key, value } => config_set(config, key, value, format),
        ConfigCommands::Path => config_path(format),
        ConfigCommands::Init => config_init(config, format),
    }
}

/// Copy of the config with secrets masked
fn masked(config: &Config) -> Config {
    let mut safe = config.clone();
    safe.steam.api_key = safe.steam.api_key.as_deref().map(mask_secret);
    safe.database.url = safe.database.url.as_deref().map(mask_database_url);
    safe
}

/// Hide the password part of a database URL
fn mask_database_url(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut parsed) if parsed.password().is_some() => {
            let _ = parsed.set_password(Some("****"));
            parsed.to_string()
        }
        _ => raw.to_string(),
    }
}

fn or_not_set(value: Option<String>) -> String {
    value.unwrap_or_else(|| "(not set)".dimmed().to_string())
}

/// Show current configuration
fn config_show(config: &Config, format: OutputFormat) -> Result<String> {
    let safe = masked(config);

    match format {
        OutputFormat::Pretty => {
            let mut output = String::new();
            output.push_str(&format!("{}\n", "Configuration".bold()));
            output.push_str(&"─".repeat(40));
            output.push('\n');

            output.push_str(&format!("\n{}\n", "[steam]".cyan()));
            output.push_str(&format!("  api_key = {}\n", or_not_set(safe.steam.api_key)));
            output.push_str(&format!("  store_url = {}\n", safe.steam.store_url));
            output.push_str(&format!("  api_url = {}\n", safe.steam.api_url));
            output.push_str(&format!("  timeout_secs = {}\n", safe.steam.timeout_secs));

            output.push_str(&format!("\n{}\n", "[database]".cyan()));
            output.push_str(&format!("  url = {}\n", or_not_set(safe.database.url)));
            output.push_str(&format!("  max_connections = {}\n", safe.database.max_connections));
            output.push_str(&format!(
                "  acquire_timeout_secs = {}\n",
                safe.database.acquire_timeout_secs
            ));
            output.push_str(&format!(
                "  catalog_file = {}\n",
                or_not_set(safe.database.catalog_file.map(|p| p.display().to_string()))
            ));

            output.push_str(&format!("\n{}\n", "[cache]".cyan()));
            output.push_str(&format!("  app_info_ttl_minutes = {}\n", safe.cache.app_info_ttl_minutes));
            output.push_str(&format!("  search_ttl_minutes = {}\n", safe.cache.search_ttl_minutes));
            output.push_str(&format!("  user_info_ttl_minutes = {}\n", safe.cache.user_info_ttl_minutes));
            output.push_str(&format!("  validity_ttl_minutes = {}\n", safe.cache.validity_ttl_minutes));

            output.push_str(&format!("\n{}\n", "[limits]".cyan()));
            output.push_str(&format!("  fetch_timeout_secs = {}\n", safe.limits.fetch_timeout_secs));
            output.push_str(&format!("  search_limit = {}\n", safe.limits.search_limit));

            output.push_str(&format!("\n{}\n", "[server]".cyan()));
            output.push_str(&format!("  host = {}\n", safe.server.host));
            output.push_str(&format!("  port = {}\n", safe.server.port));

            output.push_str(&format!("\n{}\n", "[output]".cyan()));
            output.push_str(&format!("  format = {}\n", safe.output.format));

            Ok(output)
        }
        OutputFormat::Json => json::format_json(&safe),
    }
}

/// Set a configuration value
fn config_set(config: &mut Config, key: &str, value: &str, format: OutputFormat) -> Result<String> {
    config.set_value(key, value)?;
    config.save()?;

    let shown = match key {
        "steam.api_key" => mask_secret(value),
        "database.url" => mask_database_url(value),
        _ => value.to_string(),
    };

    match format {
        OutputFormat::Pretty => Ok(format!("{} Set {} = {}", "✓".green(), key, shown)),
        OutputFormat::Json => {
            let result = serde_json::json!({
                "success": true,
                "key": key,
                "value": shown
            });
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }
}

/// Show configuration file path
fn config_path(format: OutputFormat) -> Result<String> {
    let paths = Paths::new()?;

    match format {
        OutputFormat::Pretty => {
            let mut output = String::new();
            output.push_str(&format!("Config file: {}\n", paths.config_file.display()));
            output.push_str(&format!(
                "Exists: {}\n",
                if paths.config_exists() {
                    "yes".green()
                } else {
                    "no".yellow()
                }
            ));
            Ok(output)
        }
        OutputFormat::Json => {
            let result = serde_json::json!({
                "path": paths.config_file.display().to_string(),
                "exists": paths.config_exists()
            });
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }
}

/// Initialize configuration interactively
fn config_init(config: &mut Config, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Err(ScoutError::InvalidArgument(
            "config init requires interactive mode (--output pretty)".to_string(),
        ));
    }

    println!("{}", "Steamscout Configuration".bold());
    println!("{}", "─".repeat(40));
    println!();

    // Not echoed: the key grants Web API access
    let key = rpassword::prompt_password("Enter your Steam Web API key: ")?;
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(ScoutError::InvalidArgument(
            "API key cannot be empty".to_string(),
        ));
    }
    config.set_api_key(key);

    print!("MySQL catalog URL (leave empty to skip): ");
    io::stdout().flush()?;
    let mut database_url = String::new();
    io::stdin().read_line(&mut database_url)?;
    let database_url = database_url.trim();
    if !database_url.is_empty() {
        config.database.url = Some(database_url.to_string());
    }

    config.save()?;
    let paths = Paths::new()?;

    Ok(format!(
        "\n{} Configuration saved to: {}\n\nRun '{}' to try a lookup.",
        "✓".green(),
        paths.config_file.display(),
        "steamscout search Portal".cyan()
    ))
}
