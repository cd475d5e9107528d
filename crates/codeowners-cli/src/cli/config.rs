//! Configuration handling for the CLI.
//!
//! This module converts CLI arguments into the library's configuration types.

use crate::cli::Args;
use codeowners_resolver_core::ResolverConfig;
use codeowners_resolver_core::walk::WalkConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Lookup finished successfully.
    Success = 0,
    /// Application startup failed (wrong configuration or internal error).
    StartupFailure = 1,
    /// Some files are not owned and `--fail-on-unowned` was given.
    UnownedFiles = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Which files to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    /// The given absolute paths.
    Paths(Vec<PathBuf>),
    /// Every file in the project.
    Project(WalkConfig),
}

/// Validated and processed configuration for running the resolver.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Canonical path to the project root.
    pub project_path: PathBuf,
    /// Configuration for the resolver.
    pub resolver_config: ResolverConfig,
    /// Files to look up.
    pub targets: Targets,
    /// Whether to print abbreviated owners.
    pub abbreviate: bool,
    /// Whether to print only unowned files.
    pub unowned_only: bool,
    /// Whether unowned files make the run fail.
    pub fail_on_unowned: bool,
    /// Whether to output JSON.
    pub json_output: bool,
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let project_path = args.project_path.canonicalize().map_err(|e| {
            ConfigError::Invalid(format!(
                "project path '{}' is invalid: {}",
                args.project_path.display(),
                e
            ))
        })?;

        if !project_path.is_dir() {
            return Err(ConfigError::Invalid(format!(
                "project path '{}' is not a directory",
                project_path.display()
            )));
        }

        let mut resolver_config = ResolverConfig::new();
        if let Some(ref locations) = args.codeowners_locations {
            if locations.iter().any(|l| l.as_os_str().is_empty() || l.is_absolute()) {
                return Err(ConfigError::Invalid(
                    "CODEOWNERS locations must be non-empty relative paths".to_string(),
                ));
            }
            resolver_config = resolver_config.with_rule_file_locations(locations.iter().cloned());
        }

        let targets = if args.paths.is_empty() {
            Targets::Project(WalkConfig::new().with_hidden(!args.skip_hidden))
        } else {
            let paths = args
                .paths
                .iter()
                .map(|p| absolute_path(p))
                .collect::<Result<Vec<_>, _>>()?;
            Targets::Paths(paths)
        };

        Ok(Self {
            project_path,
            resolver_config,
            targets,
            abbreviate: args.abbreviate,
            unowned_only: args.unowned,
            fail_on_unowned: args.fail_on_unowned,
            json_output: args.json,
        })
    }

    /// Determines the exit code based on the number of unowned files.
    pub fn exit_code_for_results(&self, unowned: usize) -> ExitCode {
        if self.fail_on_unowned && unowned > 0 {
            ExitCode::UnownedFiles
        } else {
            ExitCode::Success
        }
    }
}

/// Makes `path` absolute, resolving symlinks when the path exists so that it
/// lines up with the canonical project path.
fn absolute_path(path: &Path) -> Result<PathBuf, ConfigError> {
    match path.canonicalize() {
        Ok(canonical) => Ok(canonical),
        Err(_) => Ok(std::path::absolute(path)?),
    }
}
