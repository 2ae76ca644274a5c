use crate::commands;
use crate::log_debug;
use crate::ui;
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, ValueEnum, crate_version};
use std::path::Path;

const LOG_FILE: &str = "luna-debug.log";
const VERBOSE_ENV_VAR: &str = "LUNA_VERBOSE";

/// CLI structure defining the available commands and global arguments
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "Luna: AI commit messages, one file at a time",
    long_about = "Luna reads your staged changes, asks Gemini for a short commit subject per file, \
                  lets you review them, then commits every file on its own.",
    disable_version_flag = true,
    disable_help_subcommand = true,
    styles = get_styles(),
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log debug messages to a file
    #[arg(
        short = 'l',
        long = "log",
        global = true,
        help = "Log debug messages to a file"
    )]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(
        long = "log-file",
        global = true,
        help = "Specify a custom log file path"
    )]
    pub log_file: Option<String>,

    /// Suppress non-essential output (spinners, banners)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress non-essential output"
    )]
    pub quiet: bool,

    /// Display the version
    #[arg(
        short = 'v',
        long = "version",
        global = true,
        help = "Display the version"
    )]
    pub version: bool,
}

#[derive(Subcommand)]
#[command(subcommand_negates_reqs = true)]
#[command(subcommand_precedence_over_arg = true)]
pub enum Commands {
    /// Generate and review one commit per staged file
    #[command(
        visible_aliases = ["lc", "lunacommit"],
        about = "Generate commit messages for each staged file and commit them one by one",
        long_about = "Generate a commit message for every staged file with Gemini, review them \
                      interactively, then commit each file separately.\n\n\
                      Keys in review: c confirm, r retry the selected file, q quit, ↑/↓ select."
    )]
    Commit {
        /// Decorate each message with a random emoji
        #[arg(short, long, help = "Decorate each message with a random emoji")]
        emoji: bool,

        /// Commit everything without the interactive review
        #[arg(
            short,
            long,
            conflicts_with = "dry_run",
            help = "Commit every file without the interactive review"
        )]
        yes: bool,

        /// Generate and print the messages without committing
        #[arg(long, help = "Generate and print the messages without committing")]
        dry_run: bool,
    },

    /// Store the Gemini API key in the user-wide settings file
    #[command(
        visible_aliases = ["lkey", "lunaapikey"],
        about = "Set your Gemini API key"
    )]
    Apikey {
        /// The API key
        key: String,
    },

    /// Manage settings files
    #[command(
        visible_alias = "lunaconfig",
        about = "Manage project and global configuration",
        long_about = "Manage .lunacfg (current directory) and ~/.lunarc (home directory).\n\n\
                      Priority: the project API key wins when set, then the global key, then \
                      GEMINI_API_KEY. Other settings come from the project file or defaults."
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show the command overview
    #[command(visible_aliases = ["lh", "lunahelp"], about = "Show help")]
    Help,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// Create settings files with defaults
    Init {
        /// Which file(s) to create
        #[arg(long, value_enum, default_value_t = InitTarget::Project)]
        target: InitTarget,
    },
    /// Print the effective settings with the API key masked
    Show,
    /// Open the project settings file in $VISUAL or $EDITOR
    Edit,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitTarget {
    Project,
    Global,
    Both,
}

/// Define custom styles for Clap
fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Parse the command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

fn verbose_requested() -> bool {
    std::env::var(VERBOSE_ENV_VAR).is_ok_and(|v| !v.is_empty() && v != "0")
        || std::env::var("RUST_LOG").is_ok()
}

/// Main function to parse arguments and handle the command
pub async fn main() -> anyhow::Result<()> {
    let cli = parse_args();

    if cli.version {
        ui::print_version(crate_version!());
        return Ok(());
    }

    if cli.log {
        let log_file = cli.log_file.as_deref().unwrap_or(LOG_FILE);
        let verbose = verbose_requested();
        crate::logger::init(Path::new(log_file), verbose)?;
        log_debug!(
            "Logging to {} (verbose HTTP logs {})",
            log_file,
            if verbose { "on" } else { "off" }
        );
    }

    if cli.quiet {
        crate::ui::set_quiet_mode(true);
    }

    match cli.command {
        Some(command) => handle_command(command).await,
        None => {
            commands::print_overview();
            Ok(())
        }
    }
}

pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Commit {
            emoji,
            yes,
            dry_run,
        } => {
            commands::handle_commit_command(commands::CommitOptions {
                emoji,
                yes,
                dry_run,
            })
            .await
        }
        Commands::Apikey { key } => commands::handle_apikey_command(&key),
        Commands::Config { action } => match action {
            ConfigAction::Init { target } => commands::handle_config_init(target),
            ConfigAction::Show => commands::handle_config_show(),
            ConfigAction::Edit => commands::handle_config_edit(),
        },
        Commands::Help => {
            commands::print_overview();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_commit_aliases_and_flags() {
        let cli = Cli::try_parse_from(["luna", "lc", "-e"]).expect("parses");
        assert!(matches!(
            cli.command,
            Some(Commands::Commit {
                emoji: true,
                yes: false,
                dry_run: false
            })
        ));
    }

    #[test]
    fn test_yes_conflicts_with_dry_run() {
        assert!(Cli::try_parse_from(["luna", "commit", "--yes", "--dry-run"]).is_err());
    }

    #[test]
    fn test_apikey_alias() {
        let cli = Cli::try_parse_from(["luna", "lkey", "abc123"]).expect("parses");
        assert!(matches!(cli.command, Some(Commands::Apikey { key }) if key == "abc123"));
    }

    #[test]
    fn test_config_init_target() {
        let cli =
            Cli::try_parse_from(["luna", "config", "init", "--target", "both"]).expect("parses");
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init {
                    target: InitTarget::Both
                }
            })
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["luna", "commit", "--log", "--log-file", "x.log", "-q"])
            .expect("parses");
        assert!(cli.log);
        assert!(cli.quiet);
        assert_eq!(cli.log_file.as_deref(), Some("x.log"));
    }
}
