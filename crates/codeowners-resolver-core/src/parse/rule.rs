//! The rule type produced by the parser.

use serde::Serialize;
use std::fmt::{self, Display};

/// A single CODEOWNERS rule: a pattern and the owners assigned to it.
///
/// Rules are immutable values. Equality covers the line number, the pattern
/// and the owners, so two textually identical rules on different lines are
/// distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Rule {
    /// 0-based index of the line the rule was read from.
    pub line_number: usize,
    /// The raw pattern text (e.g., "*.rs", "/docs/").
    pub pattern: String,
    /// The owners, in the order they appeared on the line.
    pub owners: Vec<String>,
}

impl Rule {
    /// Creates a new rule.
    pub fn new(line_number: usize, pattern: impl Into<String>, owners: Vec<String>) -> Self {
        Self {
            line_number,
            pattern: pattern.into(),
            owners,
        }
    }

    /// Returns a copy of this rule with `prefix` removed from the start of
    /// every owner that begins with it.
    pub fn strip_owner_prefix(&self, prefix: &str) -> Self {
        let owners = self
            .owners
            .iter()
            .map(|owner| owner.strip_prefix(prefix).unwrap_or(owner).to_string())
            .collect();

        Self {
            line_number: self.line_number,
            pattern: self.pattern.clone(),
            owners,
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)?;
        for owner in &self.owners {
            write!(f, " {}", owner)?;
        }
        Ok(())
    }
}
