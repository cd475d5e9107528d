//! CLI module for the CODEOWNERS resolver.
//!
//! This module provides command-line argument parsing using Clap with
//! environment variable support.

pub mod config;
pub mod output;

use clap::Parser;
use std::path::PathBuf;

/// CODEOWNERS resolver - shows which CODEOWNERS rule owns each file.
///
/// Without PATHS, every file of the project is listed (respecting
/// .gitignore). Supports both human-readable and JSON output formats.
#[derive(Parser, Debug)]
#[command(name = "codeowners-resolver")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Files to look up. Defaults to every file in the project.
    pub paths: Vec<PathBuf>,

    /// Path to the project root.
    #[arg(long, env = "PROJECT_PATH", default_value = ".")]
    pub project_path: PathBuf,

    /// Comma-separated rule-file locations relative to a base directory,
    /// checked in order.
    /// Default: CODEOWNERS,docs/CODEOWNERS,.github/CODEOWNERS
    #[arg(long, env = "CODEOWNERS_LOCATIONS", value_delimiter = ',')]
    pub codeowners_locations: Option<Vec<PathBuf>>,

    /// Print owners without the common owner prefix.
    #[arg(long, short = 'a')]
    pub abbreviate: bool,

    /// Only print files that no rule owns.
    #[arg(long, short = 'u')]
    pub unowned: bool,

    /// Exit with a failure code if any file is not owned.
    #[arg(long, env = "FAIL_ON_UNOWNED", default_value = "false")]
    pub fail_on_unowned: bool,

    /// Skip hidden files when listing the whole project.
    #[arg(long)]
    pub skip_hidden: bool,

    /// Output results as JSON instead of human-readable format.
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Increase verbosity level (-v for info, -vv for debug, -vvv for trace).
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}
