//! Project file listing.
//!
//! Used to classify every file of a project at once.

use ignore::WalkBuilder;
use log::{debug, trace};
use std::path::{Path, PathBuf};

/// Configuration for file walking behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkConfig {
    /// Whether to include hidden files and directories (starting with `.`).
    /// Default: true
    pub include_hidden: bool,
    /// Whether to respect `.gitignore` rules (only works in git repos).
    /// Default: true
    pub respect_gitignore: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            include_hidden: true,
            respect_gitignore: true,
        }
    }
}

impl WalkConfig {
    /// Creates a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to include hidden files.
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Sets whether to respect .gitignore rules.
    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }
}

/// Lists the files of a project as absolute paths, sorted.
///
/// The `.git` directory is always skipped.
pub fn list_project_files(project_dir: &Path, config: &WalkConfig) -> Vec<PathBuf> {
    debug!(
        "Listing files in {:?} (hidden={}, gitignore={})",
        project_dir, config.include_hidden, config.respect_gitignore
    );

    let walker = WalkBuilder::new(project_dir)
        .hidden(!config.include_hidden) // hidden(true) = skip hidden files
        .ignore(false)
        .git_ignore(config.respect_gitignore)
        .git_global(config.respect_gitignore)
        .git_exclude(config.respect_gitignore)
        .require_git(false)
        .follow_links(false)
        .filter_entry(|entry| entry.file_name() != ".git")
        .sort_by_file_path(|a, b| a.cmp(b))
        .build();

    let files: Vec<PathBuf> = walker
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .collect();

    debug!("Found {} files", files.len());
    trace!("Files: {:?}", files);
    files
}
