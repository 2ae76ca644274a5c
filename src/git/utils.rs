use globset::{GlobBuilder, GlobMatcher};
use std::path::{MAIN_SEPARATOR, Path};

use crate::config::Settings;
use crate::{log_debug, log_warn};

/// Compiled form of the ignore settings.
///
/// A path is ignored when it equals an `ignoredFiles` entry, starts with an
/// entry ending in `/`, or when its base name or full path matches one of the
/// `ignoredPatterns` globs. Matching is case-sensitive and `*`/`?` never cross
/// a path separator.
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    exact: Vec<String>,
    dir_prefixes: Vec<String>,
    globs: Vec<(String, GlobMatcher)>,
}

/// Rewrite a shell glob so globset reads it with plain shell semantics:
/// braces are literal and a run of `*` is a single `*`, so `**` never
/// crosses a separator
fn shell_glob(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '[' => {
                out.push(c);
                // A leading `]` (after an optional negation) belongs to the class
                if let Some(&negation @ ('!' | '^')) = chars.peek() {
                    out.push(negation);
                    chars.next();
                }
                if let Some(&']') = chars.peek() {
                    out.push(']');
                    chars.next();
                }
                for inner in chars.by_ref() {
                    out.push(inner);
                    if inner == ']' {
                        break;
                    }
                }
            }
            '*' => {
                out.push('*');
                while chars.next_if_eq(&'*').is_some() {}
            }
            '{' => out.push_str("[{]"),
            '}' => out.push_str("[}]"),
            other => out.push(other),
        }
    }

    out
}

fn compile_glob(pattern: &str) -> Option<GlobMatcher> {
    let native = shell_glob(pattern).replace('/', &MAIN_SEPARATOR.to_string());
    match GlobBuilder::new(&native)
        .literal_separator(true)
        .case_insensitive(false)
        .build()
    {
        Ok(glob) => Some(glob.compile_matcher()),
        Err(e) => {
            log_warn!("Skipping invalid ignore pattern '{}': {}", pattern, e);
            None
        }
    }
}

impl IgnoreMatcher {
    pub fn new(settings: &Settings) -> Self {
        let (dir_prefixes, exact): (Vec<String>, Vec<String>) = settings
            .ignored_files
            .iter()
            .cloned()
            .partition(|entry| entry.ends_with('/'));

        let globs = settings
            .ignored_patterns
            .iter()
            .filter_map(|pattern| compile_glob(pattern).map(|glob| (pattern.clone(), glob)))
            .collect();

        Self {
            exact,
            dir_prefixes,
            globs,
        }
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        if self.exact.iter().any(|entry| entry == path) {
            log_debug!("File ignored by exact entry: {}", path);
            return true;
        }

        if let Some(prefix) = self.dir_prefixes.iter().find(|p| path.starts_with(p.as_str())) {
            log_debug!("File ignored by directory entry '{}': {}", prefix, path);
            return true;
        }

        let file_path = Path::new(path);
        let base_name = file_path.file_name().map(Path::new);

        for (pattern, glob) in &self.globs {
            if base_name.is_some_and(|name| glob.is_match(name)) || glob.is_match(file_path) {
                log_debug!("File ignored by pattern '{}': {}", pattern, path);
                return true;
            }
        }

        false
    }
}

/// One-shot check; prefer building an [`IgnoreMatcher`] once per run
pub fn should_ignore_file(path: &str, settings: &Settings) -> bool {
    IgnoreMatcher::new(settings).is_ignored(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(files: &[&str], patterns: &[&str]) -> Settings {
        Settings {
            ignored_files: files.iter().map(|s| (*s).to_string()).collect(),
            ignored_patterns: patterns.iter().map(|s| (*s).to_string()).collect(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_exact_entry() {
        let s = settings(&["Cargo.lock"], &[]);
        assert!(should_ignore_file("Cargo.lock", &s));
        assert!(!should_ignore_file("sub/Cargo.lock", &s));
        assert!(!should_ignore_file("Cargo.lock.bak", &s));
    }

    #[test]
    fn test_directory_prefix_entry() {
        let s = settings(&["vendor/"], &[]);
        assert!(should_ignore_file("vendor/lib.c", &s));
        assert!(should_ignore_file("vendor/deep/nested/file.rs", &s));
        assert!(!should_ignore_file("vendored/lib.c", &s));
        assert!(!should_ignore_file("src/vendor/lib.c", &s));
    }

    #[test]
    fn test_entry_without_slash_is_not_a_prefix() {
        let s = settings(&["vendor"], &[]);
        assert!(!should_ignore_file("vendor/lib.c", &s));
    }

    #[test]
    fn test_base_name_glob() {
        let s = settings(&[], &["*.png"]);
        assert!(should_ignore_file("logo.png", &s));
        assert!(should_ignore_file("assets/img/logo.png", &s));
        assert!(!should_ignore_file("logo.png.txt", &s));
    }

    #[test]
    fn test_glob_is_case_sensitive() {
        let s = settings(&[], &["*.png"]);
        assert!(!should_ignore_file("LOGO.PNG", &s));
    }

    #[test]
    fn test_full_path_glob() {
        let s = settings(&[], &["docs/*.md"]);
        assert!(should_ignore_file("docs/readme.md", &s));
        // `*` stops at the separator
        assert!(!should_ignore_file("docs/api/readme.md", &s));
        assert!(!should_ignore_file("readme.md", &s));
    }

    #[test]
    fn test_question_mark_and_class() {
        let s = settings(&[], &["file?.txt", "[ab].log"]);
        assert!(should_ignore_file("file1.txt", &s));
        assert!(!should_ignore_file("file12.txt", &s));
        assert!(should_ignore_file("a.log", &s));
        assert!(!should_ignore_file("c.log", &s));
    }

    #[test]
    fn test_braces_are_literal() {
        let s = settings(&[], &["*.{png,jpg}"]);
        assert!(!should_ignore_file("logo.png", &s));
        assert!(should_ignore_file("odd.{png,jpg}", &s));
    }

    #[test]
    fn test_double_star_does_not_cross_separator() {
        let s = settings(&[], &["docs/**/*.md"]);
        assert!(should_ignore_file("docs/api/readme.md", &s));
        assert!(!should_ignore_file("docs/api/v1/readme.md", &s));
        assert!(!should_ignore_file("docs/readme.md", &s));
    }

    #[test]
    fn test_shell_glob_rewrite() {
        assert_eq!(shell_glob("a**b"), "a*b");
        assert_eq!(shell_glob("{x}"), "[{][}]");
        assert_eq!(shell_glob("[*{]"), "[*{]");
        assert_eq!(shell_glob("[]a]*"), "[]a]*");
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let s = settings(&[], &["[unclosed", "*.bin"]);
        let matcher = IgnoreMatcher::new(&s);
        assert!(matcher.is_ignored("blob.bin"));
        assert!(!matcher.is_ignored("[unclosed"));
    }

    #[test]
    fn test_default_patterns_cover_binaries() {
        let matcher = IgnoreMatcher::new(&Settings::default());
        for path in ["app.exe", "lib.dll", "a/b.jpeg", "x.gif", "fw.bin"] {
            assert!(matcher.is_ignored(path), "{path} should be ignored");
        }
        assert!(!matcher.is_ignored("src/main.rs"));
    }
}
