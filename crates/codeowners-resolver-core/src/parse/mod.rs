//! Parser module for CODEOWNERS files.
//!
//! This module turns the text of a CODEOWNERS file into an ordered list of
//! [`Rule`]s. Blank lines, comment lines and lines without owners produce
//! no rule.
//!
//! # Example
//!
//! ```rust
//! use codeowners_resolver_core::parse::parse_rules;
//!
//! let input = r#"
//! # CODEOWNERS file
//! *.rs @rustacean
//! /docs/ @docs-team
//! "#;
//!
//! for rule in parse_rules(input) {
//!     println!("{}: {} -> {:?}", rule.line_number, rule.pattern, rule.owners);
//! }
//! ```

mod lexer;
mod parser;
mod rule;

pub use lexer::{is_blank_line, is_skipped_line};
pub use parser::{parse_rule_line, parse_rules};
pub use rule::Rule;
