//! Rule-file discovery.
//!
//! The resolver does not touch the filesystem directly. It asks a
//! [`RuleSource`] for the rule file of a base directory and a
//! [`BaseDirLocator`] for the base directory that governs a file.

use crate::config::ResolverConfig;
use crate::error::LoadError;
use log::trace;
use std::path::{Path, PathBuf};

/// Finds and reads rule files.
pub trait RuleSource {
    /// Returns the rule file governing `base_dir`, or `None` if there is none.
    fn find_rule_file(&self, base_dir: &Path) -> Option<PathBuf>;

    /// Reads the contents of a rule file.
    fn read_rule_file(&self, path: &Path) -> Result<String, LoadError>;
}

/// Finds the base directory (e.g. the owning module root) of a file.
pub trait BaseDirLocator {
    /// Returns the base directory for `file`, or `None` if it has none.
    fn base_dir_for(&self, project_base_dir: &Path, file: &Path) -> Option<PathBuf>;
}

impl<F> BaseDirLocator for F
where
    F: Fn(&Path, &Path) -> Option<PathBuf>,
{
    fn base_dir_for(&self, project_base_dir: &Path, file: &Path) -> Option<PathBuf> {
        self(project_base_dir, file)
    }
}

/// Returns the first candidate rule file that exists under `base_dir`.
pub fn find_rule_file(base_dir: &Path, locations: &[PathBuf]) -> Option<PathBuf> {
    locations
        .iter()
        .map(|location| base_dir.join(location))
        .find(|path| path.is_file())
}

/// A [`RuleSource`] backed by the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsRuleSource {
    config: ResolverConfig,
}

impl FsRuleSource {
    /// Creates a filesystem source using the given configuration.
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }
}

impl RuleSource for FsRuleSource {
    fn find_rule_file(&self, base_dir: &Path) -> Option<PathBuf> {
        find_rule_file(base_dir, &self.config.rule_file_locations)
    }

    fn read_rule_file(&self, path: &Path) -> Result<String, LoadError> {
        std::fs::read_to_string(path).map_err(|e| LoadError::read(path, e))
    }
}

/// A [`BaseDirLocator`] that picks the nearest ancestor directory holding a
/// rule file.
///
/// The search starts at the file's parent directory and stops at the project
/// root. Files inside the project without a closer rule file get the project
/// root; files outside the project have no base directory.
#[derive(Debug, Clone, Default)]
pub struct NearestRuleFileDir {
    config: ResolverConfig,
}

impl NearestRuleFileDir {
    /// Creates a locator using the given configuration.
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }
}

impl BaseDirLocator for NearestRuleFileDir {
    fn base_dir_for(&self, project_base_dir: &Path, file: &Path) -> Option<PathBuf> {
        if !file.starts_with(project_base_dir) {
            trace!("{:?} is outside of {:?}", file, project_base_dir);
            return None;
        }

        let nearest = file
            .ancestors()
            .skip(1)
            .take_while(|dir| dir.starts_with(project_base_dir))
            .find(|dir| find_rule_file(dir, &self.config.rule_file_locations).is_some());

        Some(nearest.unwrap_or(project_base_dir).to_path_buf())
    }
}
