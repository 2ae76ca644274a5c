use crate::{log_debug, log_warn};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User-wide settings file, stored in the home directory
pub const GLOBAL_CONFIG_FILENAME: &str = ".lunarc";
/// Project settings file, stored in the directory luna runs from
pub const PROJECT_CONFIG_FILENAME: &str = ".lunacfg";
/// Environment fallback for the API key
pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

/// Shortest limit that still leaves room for one character and the ellipsis
pub const MIN_COMMIT_LENGTH: usize = 4;

/// Errors raised while reading or writing settings files
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unable to determine home directory")]
    NoHomeDir,
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid settings in {}: {source}. Please check the file for syntax errors.", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("maxCommitLength must be set to at least 4, got {0}")]
    CommitLengthTooSmall(usize),
}

/// Settings for one pipeline run.
///
/// Keys missing from a file deserialize to their zero value, not to the
/// built-in defaults: a project file replaces the defaults wholesale.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Exact paths, or directory prefixes ending in `/`, never sent for generation
    #[serde(default)]
    pub ignored_files: Vec<String>,
    /// Shell globs matched against the base name and the full path
    #[serde(default)]
    pub ignored_patterns: Vec<String>,
    /// Allowed commit-type prefixes, in preference order
    #[serde(default)]
    pub commit_prefixes: Vec<String>,
    /// Zero when missing from a file, which `validate` rejects
    #[serde(default)]
    pub max_commit_length: usize,
    /// Decorate messages with an emoji even without `--emoji`
    #[serde(default)]
    pub default_emoji: bool,
    #[serde(default)]
    pub api_key: String,
}

fn default_ignored_patterns() -> Vec<String> {
    ["*.exe", "*.dll", "*.png", "*.jpg", "*.jpeg", "*.gif", "*.bin"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_commit_prefixes() -> Vec<String> {
    ["chore:", "refactor:", "feat:", "fix:", "docs:", "test:"]
        .into_iter()
        .map(String::from)
        .collect()
}

const DEFAULT_MAX_COMMIT_LENGTH: usize = 72;

impl Default for Settings {
    fn default() -> Self {
        Self {
            ignored_files: Vec::new(),
            ignored_patterns: default_ignored_patterns(),
            commit_prefixes: default_commit_prefixes(),
            max_commit_length: DEFAULT_MAX_COMMIT_LENGTH,
            default_emoji: false,
            api_key: String::new(),
        }
    }
}

/// Which settings file an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    Project,
    Global,
}

impl ConfigScope {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Project => PROJECT_CONFIG_FILENAME,
            Self::Global => GLOBAL_CONFIG_FILENAME,
        }
    }

    pub fn path(self) -> Result<PathBuf, ConfigError> {
        match self {
            Self::Project => Ok(PathBuf::from(PROJECT_CONFIG_FILENAME)),
            Self::Global => dirs::home_dir()
                .map(|home| home.join(GLOBAL_CONFIG_FILENAME))
                .ok_or(ConfigError::NoHomeDir),
        }
    }
}

impl Settings {
    /// Load the effective settings for the current directory.
    ///
    /// The project file replaces the defaults wholesale. The API key comes from
    /// the project file when set there, then the user-wide file, then
    /// `GEMINI_API_KEY`.
    pub fn load() -> Result<Self, ConfigError> {
        let project = Self::load_scope(ConfigScope::Project)?;
        let global = match Self::load_scope(ConfigScope::Global) {
            Ok(global) => global,
            Err(ConfigError::NoHomeDir) => {
                log_warn!("No home directory, skipping {}", GLOBAL_CONFIG_FILENAME);
                None
            }
            Err(e) => return Err(e),
        };
        let env_key = std::env::var(API_KEY_ENV_VAR).ok();

        let settings = Self::layer(project, global, env_key);
        settings.validate()?;
        log_debug!(
            "Settings loaded: {} ignored files, {} patterns, {} prefixes, max length {}",
            settings.ignored_files.len(),
            settings.ignored_patterns.len(),
            settings.commit_prefixes.len(),
            settings.max_commit_length
        );
        Ok(settings)
    }

    /// Combine the layers without touching the filesystem
    pub fn layer(project: Option<Self>, global: Option<Self>, env_key: Option<String>) -> Self {
        let mut settings = project.unwrap_or_default();

        if settings.api_key.is_empty() {
            if let Some(global_key) = global.map(|g| g.api_key).filter(|k| !k.is_empty()) {
                settings.api_key = global_key;
            } else if let Some(env_key) = env_key.filter(|k| !k.trim().is_empty()) {
                log_debug!("Using API key from {}", API_KEY_ENV_VAR);
                settings.api_key = env_key.trim().to_string();
            }
        }

        settings
    }

    /// Read one scope's file; `Ok(None)` when it does not exist
    pub fn load_scope(scope: ConfigScope) -> Result<Option<Self>, ConfigError> {
        let path = scope.path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(settings))
    }

    pub fn save_scope(&self, scope: ConfigScope) -> Result<PathBuf, ConfigError> {
        let path = scope.path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log_debug!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Store `api_key` in the user-wide file, keeping its other settings
    pub fn save_global_api_key(api_key: &str) -> Result<PathBuf, ConfigError> {
        let mut global = Self::load_scope(ConfigScope::Global)?.unwrap_or_default();
        global.api_key = api_key.trim().to_string();
        global.save_scope(ConfigScope::Global)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_commit_length < MIN_COMMIT_LENGTH {
            return Err(ConfigError::CommitLengthTooSmall(self.max_commit_length));
        }
        Ok(())
    }

    /// Copy suitable for display, with the API key masked
    pub fn redacted(&self) -> Self {
        let mut shown = self.clone();
        if !shown.api_key.is_empty() {
            let tail: String = shown
                .api_key
                .chars()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            shown.api_key = format!("****{tail}");
        }
        shown
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
