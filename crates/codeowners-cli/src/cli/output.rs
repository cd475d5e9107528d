//! Output formatting for the CLI.
//!
//! This module provides human-readable and JSON output formatters for
//! ownership results.

use codeowners_resolver_core::ResolutionOutcome;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// The ownership of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOwnership {
    /// Path of the file relative to the project root.
    pub path: String,
    /// Owners as they should be printed.
    pub owners: Vec<String>,
    /// The matched pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// The rule file the pattern came from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_file: Option<PathBuf>,
    /// 1-based line of the matched rule in its rule file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Resolution state.
    pub state: State,
}

/// Resolution state as printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    /// A rule owns the file.
    Owned,
    /// Rule files exist but no rule matches.
    Unowned,
    /// No rule file was found.
    NoRuleFile,
}

impl From<&ResolutionOutcome> for State {
    fn from(outcome: &ResolutionOutcome) -> Self {
        match outcome {
            ResolutionOutcome::RuleMatched(_) => State::Owned,
            ResolutionOutcome::NoMatchInRuleFile => State::Unowned,
            ResolutionOutcome::NoRuleFileFound => State::NoRuleFile,
        }
    }
}

impl FileOwnership {
    /// Returns true if no rule owns the file.
    pub fn is_unowned(&self) -> bool {
        self.state != State::Owned
    }
}

/// Collected results of a run.
#[derive(Debug, Default)]
pub struct OwnershipResults {
    files: Vec<FileOwnership>,
}

impl OwnershipResults {
    /// Creates empty results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the result for one file.
    pub fn add(&mut self, ownership: FileOwnership) {
        self.files.push(ownership);
    }

    /// Returns the number of files without an owner.
    pub fn unowned_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_unowned()).count()
    }

    /// Returns the collected results.
    pub fn files(&self) -> &[FileOwnership] {
        &self.files
    }

    /// Writes results as JSON.
    pub fn write_json<W: Write>(&self, writer: &mut W, unowned_only: bool) -> std::io::Result<()> {
        let files: Vec<&FileOwnership> = self
            .files
            .iter()
            .filter(|f| !unowned_only || f.is_unowned())
            .collect();
        let json = serde_json::to_string_pretty(&files).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }

    /// Writes results in human-readable format.
    pub fn write_human<W: Write>(
        &self,
        writer: &mut W,
        use_colors: bool,
        unowned_only: bool,
    ) -> std::io::Result<()> {
        let mut output = HumanOutput::new(writer, use_colors);
        for file in &self.files {
            if unowned_only && !file.is_unowned() {
                continue;
            }
            output.write_file(file)?;
        }

        let unowned = self.unowned_count();
        if unowned > 0 && !unowned_only {
            output.write_summary(unowned, self.files.len())?;
        }
        Ok(())
    }
}

/// Output formatter for human-readable console output.
pub struct HumanOutput<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> HumanOutput<W> {
    /// Creates a new human output formatter.
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    /// Writes one file with its owners.
    pub fn write_file(&mut self, file: &FileOwnership) -> std::io::Result<()> {
        let owners = match file.state {
            State::Owned => file.owners.join(" "),
            State::Unowned => "(unowned)".to_string(),
            State::NoRuleFile => "(no CODEOWNERS file)".to_string(),
        };

        if self.use_colors {
            let owners = match file.state {
                State::Owned => owners.green(),
                State::Unowned => owners.yellow().bold(),
                State::NoRuleFile => owners.red(),
            };
            writeln!(self.writer, "{:<50} {}", file.path, owners)
        } else {
            writeln!(self.writer, "{:<50} {}", file.path, owners)
        }
    }

    /// Writes the number of unowned files.
    pub fn write_summary(&mut self, unowned: usize, total: usize) -> std::io::Result<()> {
        let summary = format!("{} of {} file(s) have no owner", unowned, total);
        if self.use_colors {
            writeln!(self.writer, "\n{}", summary.yellow())
        } else {
            writeln!(self.writer, "\n{}", summary)
        }
    }

    /// Writes an error message.
    pub fn write_error(&mut self, message: &str) -> std::io::Result<()> {
        if self.use_colors {
            writeln!(self.writer, "{} {}", "Error:".red().bold(), message)
        } else {
            writeln!(self.writer, "Error: {}", message)
        }
    }
}
