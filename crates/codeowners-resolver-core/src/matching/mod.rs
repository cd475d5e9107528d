//! Pattern matching for CODEOWNERS files.
//!
//! This module implements gitignore-style pattern matching used by CODEOWNERS files.
//! Patterns are relative to the base directory of the rule file and follow these rules:
//!
//! - `*` matches any sequence of non-slash characters
//! - `**` matches any sequence including slashes (any path)
//! - `?` matches one non-slash character, `[...]` matches a character class
//! - `/` at the start anchors to the base directory
//! - `/` at the end matches only directories and everything below them
//! - Patterns without a `/` match at any depth

use crate::parse::Rule;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use log::debug;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// A CODEOWNERS rule compiled against the base directory of its rule file.
#[derive(Debug, Clone)]
pub struct CompiledGlob {
    /// The rule this glob was compiled from.
    rule: Rule,
    /// The directory the pattern is relative to.
    base_dir: PathBuf,
    /// The compiled matcher, `None` if the pattern could not be compiled.
    matcher: Option<GlobSet>,
    /// Whether this pattern is anchored to the base directory.
    anchored: bool,
    /// Whether this pattern matches only directories.
    directory_only: bool,
}

impl CompiledGlob {
    /// Compiles `rule` relative to `base_dir`.
    ///
    /// An invalid pattern never fails: it yields a glob that matches nothing.
    pub fn new(rule: Rule, base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let normalized = normalize_pattern(&rule.pattern);

        let matcher = compile(&normalized.globs);
        if matcher.is_none() {
            debug!(
                "Line {}: pattern {:?} is invalid, rule will never match",
                rule.line_number, rule.pattern
            );
        }

        Self {
            rule,
            base_dir,
            matcher,
            anchored: normalized.anchored,
            directory_only: normalized.directory_only,
        }
    }

    /// Returns the rule this glob was compiled from.
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Returns the original pattern string.
    pub fn pattern(&self) -> &str {
        &self.rule.pattern
    }

    /// Returns the base directory the pattern is relative to.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns true if this pattern is anchored to the base directory.
    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// Returns true if this pattern matches only directories.
    pub fn is_directory_only(&self) -> bool {
        self.directory_only
    }

    /// Returns true if the pattern compiled successfully.
    pub fn is_valid(&self) -> bool {
        self.matcher.is_some()
    }

    /// Checks if this glob matches the given absolute path.
    ///
    /// Paths outside the base directory never match.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(matcher) = &self.matcher else {
            return false;
        };
        match relative_path(&self.base_dir, path) {
            Some(relative) if !relative.is_empty() => matcher.is_match(relative.as_str()),
            _ => false,
        }
    }
}

impl PartialEq for CompiledGlob {
    fn eq(&self, other: &Self) -> bool {
        self.base_dir == other.base_dir && self.rule == other.rule
    }
}

impl Eq for CompiledGlob {}

impl Hash for CompiledGlob {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base_dir.hash(state);
        self.rule.hash(state);
    }
}

/// Returns `path` relative to `base_dir` with forward slashes.
fn relative_path(base_dir: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(base_dir).ok()?;
    let relative = relative.to_str()?;
    Some(relative.replace('\\', "/"))
}

/// Compiles glob strings into one set, `None` if any of them is invalid.
fn compile(globs: &[String]) -> Option<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for glob in globs {
        // Use literal_separator to ensure * doesn't match /
        let glob = GlobBuilder::new(glob)
            .literal_separator(true)
            .build()
            .ok()?;
        builder.add(glob);
    }
    builder.build().ok()
}

/// A CODEOWNERS pattern translated into glob syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NormalizedPattern {
    globs: Vec<String>,
    anchored: bool,
    directory_only: bool,
}

/// Normalizes a CODEOWNERS pattern to glob patterns relative to the base directory.
fn normalize_pattern(pattern: &str) -> NormalizedPattern {
    let mut pattern = pattern.to_string();
    let mut anchored = false;
    let mut directory_only = false;

    // Check for directory-only suffix
    if pattern.ends_with('/') {
        directory_only = true;
        pattern = pattern.trim_end_matches('/').to_string();
    }

    if let Some(stripped) = pattern.strip_prefix('/') {
        anchored = true;
        pattern = stripped.to_string();
    } else if directory_only && pattern.is_empty() {
        // A bare `/` names the base directory itself
        anchored = true;
    } else if !pattern.contains('/') {
        // Pattern without slash matches anywhere in the tree
        pattern = format!("**/{}", pattern);
    }
    // Patterns with an inner / but no leading / are relative to the base directory

    let globs = if pattern.is_empty() {
        vec!["**".to_string()]
    } else if directory_only {
        // e.g., /docs/ should become docs/** to match docs/anything
        vec![format!("{}/**", pattern)]
    } else if is_literal_segment(last_segment(&pattern)) {
        // A plain name matches the file itself or a directory of that name
        vec![pattern.clone(), format!("{}/**", pattern)]
    } else {
        vec![pattern]
    };

    NormalizedPattern {
        globs,
        anchored,
        directory_only,
    }
}

fn last_segment(pattern: &str) -> &str {
    pattern.rsplit('/').next().unwrap_or(pattern)
}

/// Returns true if `segment` contains no glob metacharacters.
fn is_literal_segment(segment: &str) -> bool {
    !segment.contains(['*', '?', '['])
}
