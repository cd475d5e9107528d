//! Line and file-level parsers for CODEOWNERS files.
//!
//! Malformed lines are not errors: a line that does not carry a pattern and
//! at least one owner simply yields no rule.

use super::lexer::{is_skipped_line, parse_tokens};
use super::rule::Rule;
use log::{debug, trace};

/// Parses one rule line.
///
/// `line` must already be known to be neither blank nor a comment. Returns
/// `None` when the line has fewer than two tokens.
pub fn parse_rule_line(line_index: usize, line: &str) -> Option<Rule> {
    let (_, tokens) = parse_tokens(line).ok()?;

    match tokens.split_first() {
        Some((pattern, owners)) if !owners.is_empty() => Some(Rule::new(
            line_index,
            *pattern,
            owners.iter().map(|owner| owner.to_string()).collect(),
        )),
        _ => {
            trace!("Line {}: skipped, no owners", line_index);
            None
        }
    }
}

/// Parses the contents of a CODEOWNERS file into its rules, in file order.
///
/// Line numbers are 0-based indices into the file and count blank and
/// comment lines.
pub fn parse_rules(input: &str) -> Vec<Rule> {
    debug!("Parsing CODEOWNERS file ({} bytes)", input.len());

    let rules: Vec<Rule> = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !is_skipped_line(line))
        .filter_map(|(index, line)| parse_rule_line(index, line))
        .collect();

    debug!("Parsing complete: {} rules", rules.len());
    rules
}
