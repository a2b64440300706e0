use clap::Parser;
use colored::{control::set_override, Colorize};
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use steamscout::cli::args::{Cli, Commands, CompletionsArgs};
use steamscout::cli::commands::{self, common::KeyRequirement};
use steamscout::config::Config;
use steamscout::error::ScoutError;

#[tokio::main]
async fn main() {
    // Respect NO_COLOR environment variable (https://no-color.org/)
    // Also disable colors when stdout is not a terminal (for piping)
    if std::env::var("NO_COLOR").is_ok() || !std::io::stdout().is_terminal() {
        set_override(false);
    }

    // A missing .env file is normal
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

/// Log to stderr; RUST_LOG wins over the default level
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), ScoutError> {
    let format = cli.output;

    // Handle completions command early (no config needed)
    if let Commands::Completions(CompletionsArgs { shell }) = &cli.command {
        Cli::print_completions(*shell);
        return Ok(());
    }

    let mut config = Config::load()?;

    // Config commands edit the file, so they must not see flag overrides
    if let Commands::Config(args) = &cli.command {
        let output = commands::config(&mut config, args, format)?;
        print_output(&output);
        return Ok(());
    }

    if let Some(key) = cli.api_key {
        config.steam.api_key = Some(key);
    }
    if let Some(url) = cli.database_url {
        config.database.url = Some(url);
    }

    let output = match &cli.command {
        Commands::Serve(args) => {
            let handler = commands::common::build_handler(&config, KeyRequirement::Required).await?;
            commands::serve(handler, &config.server.host, args, config.server.port).await?
        }
        Commands::Search(args) => {
            let handler = commands::common::build_handler(&config, KeyRequirement::Optional).await?;
            commands::search(&handler, args, format).await?
        }
        Commands::App(args) => {
            let handler = commands::common::build_handler(&config, KeyRequirement::Required).await?;
            commands::app(&handler, args, format).await?
        }
        Commands::User(args) => {
            let handler = commands::common::build_handler(&config, KeyRequirement::Required).await?;
            commands::user(&handler, args, format).await?
        }
        Commands::Resolve(args) => {
            let steam = commands::common::steam_client(&config, KeyRequirement::Required)?;
            commands::resolve(&steam, args, format).await?
        }
        Commands::Config(_) | Commands::Completions(_) => unreachable!(),
    };

    print_output(&output);
    Ok(())
}

fn print_output(output: &str) {
    if !output.is_empty() {
        println!("{output}");
    }
}
