//! Configuration for rule-file discovery.

use std::path::PathBuf;

/// Relative paths checked for a rule file, in order. The first one that
/// exists wins.
pub const DEFAULT_RULE_FILE_LOCATIONS: [&str; 3] =
    ["CODEOWNERS", "docs/CODEOWNERS", ".github/CODEOWNERS"];

/// Configuration options for the resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Candidate rule-file paths relative to a base directory.
    pub rule_file_locations: Vec<PathBuf>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            rule_file_locations: DEFAULT_RULE_FILE_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .collect(),
        }
    }
}

impl ResolverConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the candidate rule-file paths.
    pub fn with_rule_file_locations<I, P>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.rule_file_locations = locations.into_iter().map(Into::into).collect();
        self
    }
}
