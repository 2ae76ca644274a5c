use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use std::fmt::Write;
use std::time::Duration;

use crate::pipeline::{FileStatus, PipelineSession};

// RGB tuples for the `colored` crate's `.truecolor()`
pub mod rgb {
    pub const ELECTRIC_PURPLE: (u8, u8, u8) = (225, 53, 255);
    pub const NEON_CYAN: (u8, u8, u8) = (128, 255, 234);
    pub const ELECTRIC_YELLOW: (u8, u8, u8) = (241, 250, 140);
    pub const SUCCESS_GREEN: (u8, u8, u8) = (80, 250, 123);
    pub const ERROR_RED: (u8, u8, u8) = (255, 99, 99);
    pub const DIM_WHITE: (u8, u8, u8) = (180, 180, 190);
}

const BANNER_GRADIENT: [(u8, u8, u8); 5] = [
    rgb::ELECTRIC_PURPLE,
    (200, 100, 255),
    (180, 150, 250),
    (150, 200, 245),
    rgb::NEON_CYAN,
];

/// Track quiet mode state
static QUIET_MODE: std::sync::LazyLock<Mutex<bool>> =
    std::sync::LazyLock::new(|| Mutex::new(false));

/// Enable or disable quiet mode
pub fn set_quiet_mode(enabled: bool) {
    let mut quiet_mode = QUIET_MODE.lock();
    *quiet_mode = enabled;
}

/// Check if quiet mode is enabled
pub fn is_quiet_mode() -> bool {
    *QUIET_MODE.lock()
}

pub fn create_spinner(message: &str) -> ProgressBar {
    if is_quiet_mode() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars("✦✧✶✷✸✹✺✻✼✽")
        .template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn print_info(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.cyan().bold());
    }
}

pub fn print_warning(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.yellow().bold());
    }
}

pub fn print_error(message: &str) {
    // Always print errors, even in quiet mode
    eprintln!("{}", message.red().bold());
}

pub fn print_success(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.green().bold());
    }
}

pub fn print_version(version: &str) {
    if !is_quiet_mode() {
        println!(
            "{} {} {}",
            create_gradient_text("🌙 Luna"),
            "version".cyan(),
            version.green()
        );
    }
}

/// Print content between two rules
pub fn print_bordered_content(content: &str) {
    if !is_quiet_mode() {
        println!("{}", "━".repeat(50).bright_purple());
        println!("{content}");
        println!("{}", "━".repeat(50).bright_purple());
    }
}

pub fn print_message(message: &str) {
    if !is_quiet_mode() {
        println!("{message}");
    }
}

pub fn print_newline() {
    if !is_quiet_mode() {
        println!();
    }
}

/// Electric purple to neon cyan
pub fn create_gradient_text(text: &str) -> String {
    apply_gradient(text, &BANNER_GRADIENT)
}

fn apply_gradient(text: &str, gradient: &[(u8, u8, u8)]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let chars_len = chars.len();
    let gradient_len = gradient.len();

    let mut result = String::new();

    if chars_len == 0 || gradient_len == 0 {
        return result;
    }

    for (i, c) in chars.iter().enumerate() {
        let index = if chars_len == 1 {
            0
        } else {
            i * (gradient_len - 1) / (chars_len - 1)
        };
        let (r, g, b) = gradient.get(index).copied().unwrap_or(rgb::ELECTRIC_PURPLE);
        let _ = write!(result, "{}", c.to_string().truecolor(r, g, b));
    }

    result
}

fn status_line(status: &FileStatus) -> String {
    let text = status.to_string();
    let (r, g, b) = match status {
        FileStatus::Failed(_) => rgb::ERROR_RED,
        FileStatus::Ignored | FileStatus::Pending => rgb::DIM_WHITE,
        FileStatus::Generated => rgb::ELECTRIC_YELLOW,
        FileStatus::Committed(_) => rgb::SUCCESS_GREEN,
    };
    text.truecolor(r, g, b).to_string()
}

/// Plain-terminal version of the review list, one block per file
pub fn format_review(session: &PipelineSession) -> String {
    let mut out = String::new();
    for path in &session.files {
        let status = session.status(path);
        let glyph = if status.is_error() { "❌" } else { "✅" };
        let message = session.message(path).unwrap_or_default();
        let (r, g, b) = rgb::NEON_CYAN;
        let _ = writeln!(out, "{glyph} {}: {message}", path.truecolor(r, g, b));
        let _ = writeln!(out, "   Result: {}", status_line(status));
    }
    out
}

pub fn print_review(session: &PipelineSession) {
    if !is_quiet_mode() {
        println!("{}", "📝 Review Commit Messages:".bold());
        println!();
        print!("{}", format_review(session));
    }
}
