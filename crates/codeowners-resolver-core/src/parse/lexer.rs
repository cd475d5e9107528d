//! Token parsers for CODEOWNERS lines.
//!
//! This module contains nom-based parsers that split a line into its
//! whitespace-separated tokens.

use nom::{
    IResult, Parser,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, space0},
    combinator::rest,
    multi::many0,
    sequence::preceded,
};

/// Characters that can appear in a token.
fn is_token_char(c: char) -> bool {
    !c.is_whitespace()
}

/// Characters that separate tokens.
fn is_separator_char(c: char) -> bool {
    c.is_whitespace()
}

/// Parses a complete comment line (optional whitespace + # + content).
pub fn parse_comment_line(input: &str) -> IResult<&str, &str> {
    (space0, char('#'), rest)
        .map(|(_, _, content)| content)
        .parse(input)
}

/// Checks if a line is blank (empty or only whitespace).
pub fn is_blank_line(input: &str) -> bool {
    input.trim().is_empty()
}

/// Returns true if the line should not be handed to the rule parser.
pub fn is_skipped_line(input: &str) -> bool {
    is_blank_line(input) || parse_comment_line(input).is_ok()
}

/// Splits a line into its whitespace-separated tokens.
///
/// A token starting with `#` opens a trailing comment; it and everything
/// after it are dropped.
pub fn parse_tokens(input: &str) -> IResult<&str, Vec<&str>> {
    many0(preceded(take_while(is_separator_char), take_while1(is_token_char)))
        .map(|tokens: Vec<&str>| {
            tokens
                .into_iter()
                .take_while(|token| !token.starts_with('#'))
                .collect()
        })
        .parse(input)
}
