//! Owner prefix collapsing.
//!
//! Owners in one CODEOWNERS file usually share an organization, e.g.
//! `@org/docs-team` and `@org/go-team`. The shared leading path segments are
//! stripped so owners can be shown compactly, and restored on demand.

use crate::parse::Rule;
use log::debug;
use std::fmt::{self, Display};

/// The owner prefix computed for one load of a rule file.
///
/// The prefix is always empty or ends with `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerPrefix(String);

impl OwnerPrefix {
    /// Creates a prefix from an already computed string.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    /// Returns the prefix string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if no prefix is stripped.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rebuilds the full owner name from an abbreviated one.
    pub fn restore(&self, abbreviated: &str) -> String {
        format!("{}{}", self.0, abbreviated)
    }

    /// Removes the prefix from `owner` if present.
    pub fn abbreviate<'a>(&self, owner: &'a str) -> &'a str {
        owner.strip_prefix(self.0.as_str()).unwrap_or(owner)
    }
}

impl Display for OwnerPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rules with their common owner prefix removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapsedRules {
    /// The prefix that was stripped.
    pub prefix: OwnerPrefix,
    /// The rules, in their original order, with abbreviated owners.
    pub rules: Vec<Rule>,
}

/// Returns the longest leading substring shared by `a` and `b`.
fn shared_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((idx, _), _)| idx)
        .unwrap_or_else(|| a.len().min(b.len()));
    &a[..end]
}

/// Computes the common owner prefix across `owners`.
///
/// The shared leading substring is cut just after its last `/`, so only whole
/// path segments are ever stripped: `@org/team-a` and `@org/team-b` share
/// `@org/`, never `@org/team-`. Without a `/` the prefix is empty.
pub fn common_owner_prefix<'a, I>(owners: I) -> OwnerPrefix
where
    I: IntoIterator<Item = &'a str>,
{
    let mut owners = owners.into_iter();
    let Some(first) = owners.next() else {
        return OwnerPrefix::default();
    };

    let shared = owners.fold(first, |acc, owner| shared_prefix(acc, owner));

    match shared.rfind('/') {
        Some(idx) => OwnerPrefix::new(&shared[..=idx]),
        None => OwnerPrefix::default(),
    }
}

/// Strips the common owner prefix from every rule.
pub fn collapse_owner_prefix(rules: &[Rule]) -> CollapsedRules {
    let prefix = common_owner_prefix(
        rules
            .iter()
            .flat_map(|rule| rule.owners.iter().map(String::as_str)),
    );
    debug!("Common owner prefix: {:?}", prefix.as_str());

    let rules = rules
        .iter()
        .map(|rule| rule.strip_owner_prefix(prefix.as_str()))
        .collect();

    CollapsedRules { prefix, rules }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_rules;

    fn prefix_of(owners: &[&str]) -> String {
        common_owner_prefix(owners.iter().copied()).as_str().to_string()
    }

    #[test]
    fn empty_owner_list_has_empty_prefix() {
        assert_eq!(prefix_of(&[]), "");
        assert!(collapse_owner_prefix(&[]).prefix.is_empty());
    }

    #[test]
    fn prefix_stops_at_segment_boundary() {
        assert_eq!(prefix_of(&["org/team-a", "org/team-b"]), "org/");
    }

    #[test]
    fn no_separator_means_no_prefix() {
        assert_eq!(prefix_of(&["@alice", "@bob"]), "");
        assert_eq!(prefix_of(&["team-a", "team-b"]), "");
    }

    #[test]
    fn single_owner_keeps_last_segment() {
        assert_eq!(prefix_of(&["@org/docs-team"]), "@org/");
    }

    #[test]
    fn nested_segments() {
        assert_eq!(prefix_of(&["a/b/c/x", "a/b/c/y", "a/b/d"]), "a/b/");
    }

    #[test]
    fn prefix_is_order_independent() {
        let forward = prefix_of(&["@org/a", "@org/sub/b", "@org/c"]);
        let backward = prefix_of(&["@org/c", "@org/sub/b", "@org/a"]);
        assert_eq!(forward, "@org/");
        assert_eq!(forward, backward);
    }

    #[test]
    fn multibyte_owners() {
        assert_eq!(prefix_of(&["@ørg/ä", "@ørg/ö"]), "@ørg/");
    }

    #[test]
    fn mixed_owner_kinds_have_no_prefix() {
        assert_eq!(prefix_of(&["@org/team", "dev@example.com"]), "");
    }

    #[test]
    fn collapse_and_restore_round_trip() {
        let rules = parse_rules("* @org/default-team\n/docs/ @org/docs-team\n*.go @org/go-team\n");
        let collapsed = collapse_owner_prefix(&rules);

        assert_eq!(collapsed.prefix.as_str(), "@org/");
        assert_eq!(collapsed.rules[1].owners, vec!["docs-team"]);

        for (original, stripped) in rules.iter().zip(&collapsed.rules) {
            assert_eq!(original.line_number, stripped.line_number);
            for (full, short) in original.owners.iter().zip(&stripped.owners) {
                assert_eq!(&collapsed.prefix.restore(short), full);
                assert_eq!(collapsed.prefix.abbreviate(full), short);
            }
        }
    }
}
