use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

/// Look up Steam games, achievement schemas and player progress
#[derive(Parser)]
#[command(name = "steamscout")]
#[command(version, propagate_version = true)]
#[command(about = "Look up Steam games, achievement schemas and player progress")]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Steam Web API key (overrides config file)
    #[arg(long, env = "STEAM_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// MySQL catalog URL (overrides config file)
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    pub database_url: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Write a shell completion script to stdout
    pub fn print_completions(shell: Shell) {
        let mut command = Self::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    }
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored, human-readable output
    #[default]
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP lookup service
    Serve(ServeArgs),

    /// Search the catalog for games by name or app id
    #[command(alias = "s")]
    Search(SearchArgs),

    /// Show store details and achievements for an app
    #[command(alias = "a")]
    App(AppArgs),

    /// Show a user's achievement progress in an app
    #[command(alias = "u")]
    User(UserArgs),

    /// Resolve a profile vanity name to a Steam id
    Resolve(ResolveArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the serve command
#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind (overrides config file)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,
}

/// Arguments for the search command
#[derive(Args)]
pub struct SearchArgs {
    /// Name fragment or exact app id
    pub text: String,
}

/// Arguments for the app command
#[derive(Args)]
pub struct AppArgs {
    /// Steam app id
    pub appid: String,

    /// Hide the achievement list
    #[arg(long)]
    pub no_achievements: bool,
}

/// Arguments for the user command
#[derive(Args)]
pub struct UserArgs {
    /// Steam app id
    pub appid: String,

    /// 64-bit Steam id of the player
    pub steamid: String,

    /// Show only locked achievements
    #[arg(long)]
    pub locked: bool,
}

/// Arguments for the resolve command
#[derive(Args)]
pub struct ResolveArgs {
    /// Profile vanity name (the part after /id/ in a profile URL)
    pub name: String,
}

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., cache.app_info_ttl_minutes)
        key: String,
        /// Value to set
        value: String,
    },
    /// Show configuration file path
    Path,
    /// Initialize configuration interactively
    Init,
}

/// Arguments for the completions command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
