use crate::cli::InitTarget;
use crate::commit::CommitMessageGenerator;
use crate::config::{ConfigScope, Settings};
use crate::git::{GitCli, IgnoreMatcher};
use crate::llm_providers::GeminiProvider;
use crate::pipeline::{EffectRunner, HeadlessMode, Lifecycle, run_headless};
use crate::tui::{self, ExitResult};
use crate::ui;
use crate::{log_debug, log_info, log_warn};
use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::Command;
use std::sync::Arc;

const NOTHING_STAGED: &str = "No staged files to commit.";

/// Options for the `commit` subcommand
#[derive(Debug, Clone, Copy, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct CommitOptions {
    pub emoji: bool,
    pub yes: bool,
    pub dry_run: bool,
}

/// Build the runner for the current repository from the effective settings
fn build_pipeline(settings: Settings, use_emoji: bool) -> (EffectRunner, IgnoreMatcher) {
    let matcher = IgnoreMatcher::new(&settings);
    let provider = Arc::new(GeminiProvider::new(settings.api_key.clone()));
    let generator = Arc::new(CommitMessageGenerator::from_entropy(
        provider, settings, use_emoji,
    ));
    (EffectRunner::new(Arc::new(GitCli::new()), generator), matcher)
}

pub async fn handle_commit_command(options: CommitOptions) -> Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;
    if !settings.has_api_key() {
        log_warn!("No API key configured");
        ui::print_warning(
            "No Gemini API key configured; messages will fall back to \"update <file>\". \
             Run `luna apikey <KEY>` to set one.",
        );
    }

    let use_emoji = options.emoji || settings.default_emoji;
    log_debug!(
        "Starting commit run (emoji: {}, yes: {}, dry run: {})",
        use_emoji,
        options.yes,
        options.dry_run
    );
    let (runner, matcher) = build_pipeline(settings, use_emoji);

    if options.yes || options.dry_run {
        let mode = if options.dry_run {
            HeadlessMode::DryRun
        } else {
            HeadlessMode::CommitAll
        };
        return run_without_tui(&runner, &matcher, mode).await;
    }

    match tui::run_review(runner, matcher)? {
        ExitResult::NothingStaged => {
            ui::print_info(NOTHING_STAGED);
            Ok(())
        }
        ExitResult::Completed { committed } => {
            print_committed(committed);
            Ok(())
        }
        ExitResult::Quit => {
            ui::print_info("Quit before committing everything.");
            Ok(())
        }
        ExitResult::Failed(cause) => Err(anyhow!(cause)),
    }
}

fn print_committed(committed: usize) {
    if committed == 0 {
        ui::print_info("Nothing was committed.");
    } else {
        ui::print_success(&format!(
            "🎉 Committed {committed} file{}",
            if committed == 1 { "" } else { "s" }
        ));
    }
}

async fn run_without_tui(
    runner: &EffectRunner,
    matcher: &IgnoreMatcher,
    mode: HeadlessMode,
) -> Result<()> {
    let spinner = ui::create_spinner("Generating commit messages...");
    let session = run_headless(runner, matcher, mode).await;
    spinner.finish_and_clear();

    if !session.files.is_empty() {
        ui::print_review(&session);
    }

    match session.lifecycle {
        Lifecycle::Error => Err(anyhow!(
            session
                .last_error
                .unwrap_or_else(|| "unknown error".to_string())
        )),
        Lifecycle::Complete if session.files.is_empty() => {
            ui::print_info(NOTHING_STAGED);
            Ok(())
        }
        Lifecycle::Complete => {
            print_committed(session.committed_count());
            Ok(())
        }
        Lifecycle::Loading | Lifecycle::Processing | Lifecycle::Review => {
            ui::print_info("Dry run: nothing was committed.");
            Ok(())
        }
    }
}

pub fn handle_apikey_command(key: &str) -> Result<()> {
    let key = key.trim();
    if key.is_empty() {
        bail!("API key must not be empty");
    }
    let path = Settings::save_global_api_key(key).context("Failed to save API key")?;
    log_info!("API key stored in {}", path.display());
    ui::print_success(&format!("API key saved to {}", path.display()));
    Ok(())
}

pub fn handle_config_init(target: InitTarget) -> Result<()> {
    let scopes: &[ConfigScope] = match target {
        InitTarget::Project => &[ConfigScope::Project],
        InitTarget::Global => &[ConfigScope::Global],
        InitTarget::Both => &[ConfigScope::Project, ConfigScope::Global],
    };

    for &scope in scopes {
        create_settings_file(scope)?;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    for &scope in scopes {
        let key = ask_for_api_key(scope, &mut input)?;
        if key.is_empty() {
            continue;
        }
        let mut settings = Settings::load_scope(scope)?.unwrap_or_default();
        settings.api_key = key;
        let path = settings.save_scope(scope)?;
        ui::print_success(&format!("🗸 API key stored in {}", path.display()));
    }

    Ok(())
}

fn scope_location(scope: ConfigScope) -> &'static str {
    match scope {
        ConfigScope::Project => "current directory",
        ConfigScope::Global => "home directory",
    }
}

/// Write a defaults file unless one is already there
fn create_settings_file(scope: ConfigScope) -> Result<()> {
    let path = scope.path()?;
    if path.exists() {
        ui::print_info(&format!(
            "🛈 {} already exists in {}",
            scope.file_name(),
            scope_location(scope)
        ));
        return Ok(());
    }

    Settings::default().save_to(&path)?;
    ui::print_success(&format!(
        "🗸 Created {} in {}",
        scope.file_name(),
        scope_location(scope)
    ));
    Ok(())
}

/// Prompt for a key; a blank answer takes whatever is on the clipboard
fn ask_for_api_key(scope: ConfigScope, input: &mut impl BufRead) -> Result<String> {
    let label = match scope {
        ConfigScope::Project => "project",
        ConfigScope::Global => "global",
    };
    print!("→ Set API key for {label}? (Enter to skip or paste) ");
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let typed = line.trim();
    if !typed.is_empty() {
        return Ok(typed.to_string());
    }

    Ok(read_clipboard().unwrap_or_default())
}

fn read_clipboard() -> Option<String> {
    let mut clipboard = match arboard::Clipboard::new() {
        Ok(clipboard) => clipboard,
        Err(e) => {
            log_debug!("Clipboard unavailable: {}", e);
            return None;
        }
    };
    clipboard
        .get_text()
        .ok()
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty() && !text.contains(char::is_whitespace))
}

pub fn handle_config_show() -> Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;
    print_configuration(&settings);
    let json = serde_json::to_string_pretty(&settings.redacted())?;
    ui::print_bordered_content(&json);
    Ok(())
}

fn print_configuration(settings: &Settings) {
    let project = Path::new(ConfigScope::Project.file_name()).exists();
    let global = ConfigScope::Global.path().is_ok_and(|p| p.exists());

    ui::print_newline();
    ui::print_message(&format!(
        "{}  {}  {}",
        "━━━".bright_purple(),
        "LUNA CONFIGURATION".cyan().bold(),
        "━━━".bright_purple()
    ));
    print_config_row("Project", if project { "found" } else { "defaults" });
    print_config_row("Global", if global { "found" } else { "missing" });
    print_config_row(
        "API key",
        if settings.has_api_key() { "set" } else { "not set" },
    );
}

fn print_config_row(label: &str, value: &str) {
    ui::print_message(&format!("{}  {}", format!("{label:>12}").dimmed(), value.bold()));
}

pub fn handle_config_edit() -> Result<()> {
    let path = ConfigScope::Project.path()?;
    if !path.exists() {
        Settings::default().save_to(&path)?;
        ui::print_info(&format!("🗸 Created {}", path.display()));
    }

    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string());
    log_debug!("Opening {} with {}", path.display(), editor);

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| format!("Failed to launch editor '{editor}'"))?;
    if !status.success() {
        bail!("Editor '{editor}' exited with {status}");
    }

    // Surface syntax errors right away
    if let Some(settings) = Settings::load_from(&path)? {
        settings.validate()?;
    }
    ui::print_success(&format!("{} saved", path.display()));
    Ok(())
}

/// Banner plus command list, also shown with no subcommand
pub fn print_overview() {
    if ui::is_quiet_mode() {
        return;
    }
    println!("{}", ui::create_gradient_text("🌙 Luna - AI Git Assistant"));
    println!(
        "
Available commands:

  {help} (lh)
  -> Shows this help screen

  {commit} (lc)
  -> Generates a commit message per staged file using Gemini
  -> Use -e for emojis, --yes to skip review, --dry-run to only preview

  {apikey} (lkey)
  -> Sets your Gemini API key

  {config}
  -> init | show | edit project and global configuration
",
        help = "luna help".green().bold(),
        commit = "luna commit".green().bold(),
        apikey = "luna apikey <KEY>".green().bold(),
        config = "luna config".green().bold(),
    );
}
