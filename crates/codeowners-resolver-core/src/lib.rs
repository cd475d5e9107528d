//! CODEOWNERS Resolver Core
//!
//! A library for finding which CODEOWNERS rule owns a file in a project.
//!
//! # Features
//!
//! - **Parser**: Read CODEOWNERS files into ordered rules, skipping comments and malformed lines
//! - **Matching**: gitignore-style patterns relative to the rule file's base directory
//! - **Last Match Wins**: The latest matching rule in a file decides ownership
//! - **Owner Prefixes**: Shared owner prefixes (e.g. `@org/`) are stripped for display and
//!   restorable
//! - **Nested Rule Files**: Rule files of nested base directories override enclosing ones
//!
//! # Quick Start
//!
//! ```rust
//! use std::path::Path;
//! use codeowners_resolver_core::parse::parse_rules;
//! use codeowners_resolver_core::prefix::collapse_owner_prefix;
//! use codeowners_resolver_core::table::{ResolutionTable, RuleFileHandle};
//!
//! let input = r#"
//! # CODEOWNERS file
//! *       @org/default-team
//! /docs/  @org/docs-team
//! *.go    @org/go-team
//! "#;
//!
//! let collapsed = collapse_owner_prefix(&parse_rules(input));
//!
//! let mut table = ResolutionTable::new();
//! table.put(RuleFileHandle::new("/repo/CODEOWNERS", "/repo"), collapsed.rules);
//!
//! let glob = table.lookup(Path::new("/repo/src/main.go")).unwrap();
//! assert_eq!(glob.rule().owners, vec!["go-team"]);
//! assert_eq!(collapsed.prefix.restore("go-team"), "@org/go-team");
//! ```
//!
//! # Modules
//!
//! - [`parse`]: Parser for CODEOWNERS files
//! - [`prefix`]: Owner prefix collapsing
//! - [`matching`]: Pattern matching for CODEOWNERS files
//! - [`table`]: Ordered rule storage with last-match lookup
//! - [`resolver`]: Lazy loading and the owner decision for a file
//! - [`discovery`]: Rule-file and base-directory discovery
//! - [`walk`]: Project file listing

pub mod config;
pub mod discovery;
pub mod error;
pub mod matching;
pub mod parse;
pub mod prefix;
pub mod resolver;
pub mod table;
pub mod walk;

// Re-export commonly used types at the crate root
pub use config::ResolverConfig;
pub use discovery::{BaseDirLocator, FsRuleSource, NearestRuleFileDir, RuleSource};
pub use error::LoadError;
pub use parse::{Rule, parse_rules};
pub use prefix::OwnerPrefix;
pub use resolver::{CodeOwnersResolver, ResolutionOutcome};
pub use table::{ResolutionTable, RuleFileHandle};
