//! Owner resolution for project files.
//!
//! [`CodeOwnersResolver`] owns the [`ResolutionTable`] of one project and
//! loads rule files lazily: looking up a file whose base directory has not
//! been loaded yet reads, parses and compiles that directory's rule file as
//! a side effect. Call [`CodeOwnersResolver::ensure_loaded`] first if the
//! lookup itself should not touch the filesystem.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use codeowners_resolver_core::{CodeOwnersResolver, ResolutionOutcome};
//!
//! let project = Path::new("/path/to/repo");
//! let mut resolver = CodeOwnersResolver::new();
//!
//! match resolver.get_file_code_owner_state(project, &project.join("src/main.rs")) {
//!     ResolutionOutcome::RuleMatched(rule) => {
//!         for owner in &rule.owners {
//!             println!("{}", resolver.get_true_code_owner(owner));
//!         }
//!     }
//!     ResolutionOutcome::NoMatchInRuleFile => println!("unowned"),
//!     ResolutionOutcome::NoRuleFileFound => println!("no CODEOWNERS file"),
//! }
//! ```

use crate::config::ResolverConfig;
use crate::discovery::{BaseDirLocator, FsRuleSource, NearestRuleFileDir, RuleSource};
use crate::error::LoadError;
use crate::parse::{Rule, parse_rules};
use crate::prefix::{OwnerPrefix, collapse_owner_prefix};
use crate::table::{ResolutionTable, RuleFileHandle};
use log::{debug, trace, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// The owner decision for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "rule", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// A rule matched; its owners are abbreviated by the owner prefix.
    RuleMatched(Rule),
    /// No rule file exists for the project or the file's base directory.
    NoRuleFileFound,
    /// Rule files were loaded but none of their rules matches the file.
    NoMatchInRuleFile,
}

impl ResolutionOutcome {
    /// Returns the matched rule, if any.
    pub fn rule(&self) -> Option<&Rule> {
        match self {
            ResolutionOutcome::RuleMatched(rule) => Some(rule),
            _ => None,
        }
    }

    /// Returns true if a rule matched.
    pub fn is_owned(&self) -> bool {
        matches!(self, ResolutionOutcome::RuleMatched(_))
    }
}

/// Resolves the owners of files in one project.
///
/// Not designed for concurrent use: every mutating operation takes
/// `&mut self`, so callers share a resolver through a single owner.
#[derive(Debug)]
pub struct CodeOwnersResolver<S = FsRuleSource, L = NearestRuleFileDir> {
    source: S,
    locator: L,
    table: ResolutionTable,
    /// Prefix stripped during the most recent load.
    owner_prefix: OwnerPrefix,
}

impl CodeOwnersResolver {
    /// Creates a resolver that reads rule files from the local filesystem.
    pub fn new() -> Self {
        Self::with_config(ResolverConfig::default())
    }

    /// Creates a filesystem resolver using the given configuration.
    pub fn with_config(config: ResolverConfig) -> Self {
        Self::with_collaborators(
            FsRuleSource::new(config.clone()),
            NearestRuleFileDir::new(config),
        )
    }
}

impl Default for CodeOwnersResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RuleSource, L: BaseDirLocator> CodeOwnersResolver<S, L> {
    /// Creates a resolver with the given rule source and base-directory locator.
    pub fn with_collaborators(source: S, locator: L) -> Self {
        Self {
            source,
            locator,
            table: ResolutionTable::new(),
            owner_prefix: OwnerPrefix::default(),
        }
    }

    /// Returns the resolution table.
    pub fn table(&self) -> &ResolutionTable {
        &self.table
    }

    /// Returns the owner prefix stripped during the most recent load.
    pub fn owner_prefix(&self) -> &OwnerPrefix {
        &self.owner_prefix
    }

    /// Decides which rule owns `file`.
    ///
    /// The project root's rules are loaded first. Matching then tries the
    /// file's own base directory before the project root, loading it on
    /// first use. If neither scoped attempt matches, the whole table is
    /// searched once more.
    pub fn get_file_code_owner_state(
        &mut self,
        project_base_dir: &Path,
        file: &Path,
    ) -> ResolutionOutcome {
        trace!("Resolving owner of {:?}", file);
        self.ensure_loaded(project_base_dir);

        let module_dir = self
            .locator
            .base_dir_for(project_base_dir, file)
            .filter(|dir| dir != project_base_dir);

        // Nearest rule file first, so a nested rule file overrides the project one
        let nested = module_dir
            .as_deref()
            .and_then(|dir| self.match_or_load(dir, file));
        if let Some(rule) = nested.or_else(|| self.match_in(project_base_dir, file)) {
            return ResolutionOutcome::RuleMatched(rule);
        }

        if self.table.is_empty() {
            debug!("No rule file found for {:?}", file);
            return ResolutionOutcome::NoRuleFileFound;
        }

        match self.table.lookup(file) {
            Some(glob) => ResolutionOutcome::RuleMatched(glob.rule().clone()),
            None => {
                debug!("No rule matches {:?}", file);
                ResolutionOutcome::NoMatchInRuleFile
            }
        }
    }

    /// Matches `file` against the rules of `base_dir`, loading them first if
    /// they are not loaded yet.
    fn match_or_load(&mut self, base_dir: &Path, file: &Path) -> Option<Rule> {
        if !self.ensure_loaded(base_dir) {
            return None;
        }
        self.match_in(base_dir, file)
    }

    fn match_in(&self, base_dir: &Path, file: &Path) -> Option<Rule> {
        self.table
            .lookup_in(base_dir, file)
            .map(|glob| glob.rule().clone())
    }

    /// Loads the rule file of `base_dir` unless it is already loaded.
    ///
    /// Returns true if rules for `base_dir` are available afterwards.
    pub fn ensure_loaded(&mut self, base_dir: &Path) -> bool {
        if !self.table.has_handle_for(base_dir) {
            self.load(base_dir);
        }
        self.table.has_handle_for(base_dir)
    }

    /// Reloads rules from scratch.
    ///
    /// Everything is dropped, then only the project root's rule file is
    /// loaded again. Other base directories load on their next lookup.
    pub fn refresh_code_owner_rules(&mut self, project_base_dir: &Path) {
        debug!("Refreshing CODEOWNERS rules for {:?}", project_base_dir);
        self.table.clear();
        self.owner_prefix = OwnerPrefix::default();
        self.load(project_base_dir);
    }

    /// Rebuilds a full owner name from an abbreviated one, using the prefix
    /// of the most recent load.
    pub fn get_true_code_owner(&self, abbreviated: &str) -> String {
        self.owner_prefix.restore(abbreviated)
    }

    /// Rebuilds the full owner names of `rule` with the prefix recorded for
    /// the rule file it came from.
    pub fn true_owners(&self, rule: &Rule) -> Vec<String> {
        let prefix = self
            .table
            .handle_for_rule(rule)
            .and_then(|handle| self.table.owner_prefix_for(handle.base_dir()))
            .unwrap_or(&self.owner_prefix);

        rule.owners
            .iter()
            .map(|owner| prefix.restore(owner))
            .collect()
    }

    /// Returns the rule file `rule` was loaded from.
    pub fn get_code_owner_file_for_rule(&self, rule: &Rule) -> Option<PathBuf> {
        self.table.reverse_lookup(rule).map(Path::to_path_buf)
    }

    fn load(&mut self, base_dir: &Path) {
        let Some(file) = self.source.find_rule_file(base_dir) else {
            trace!("No rule file in {:?}", base_dir);
            return;
        };

        if let Err(e) = self.load_rule_file(base_dir, &file) {
            warn!("{}", e);
        }
    }

    fn load_rule_file(&mut self, base_dir: &Path, file: &Path) -> Result<(), LoadError> {
        debug!("Loading rule file {:?} for {:?}", file, base_dir);
        let content = self.source.read_rule_file(file)?;

        let rules = parse_rules(&content);
        let collapsed = collapse_owner_prefix(&rules);

        self.table
            .put(RuleFileHandle::new(file, base_dir), collapsed.rules);
        self.table
            .set_owner_prefix(base_dir, collapsed.prefix.clone());
        self.owner_prefix = collapsed.prefix;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::fs;
    use std::io;
    use tempfile::TempDir;

    /// In-memory rule files keyed by base directory.
    #[derive(Default)]
    struct MemorySource {
        files: HashMap<PathBuf, String>,
        unreadable: Vec<PathBuf>,
        reads: Cell<usize>,
    }

    impl MemorySource {
        fn with(mut self, base_dir: &str, content: &str) -> Self {
            self.files.insert(PathBuf::from(base_dir), content.to_string());
            self
        }

        fn unreadable(mut self, base_dir: &str) -> Self {
            self.unreadable.push(PathBuf::from(base_dir));
            self
        }
    }

    impl RuleSource for MemorySource {
        fn find_rule_file(&self, base_dir: &Path) -> Option<PathBuf> {
            (self.files.contains_key(base_dir) || self.unreadable.iter().any(|d| d == base_dir))
                .then(|| base_dir.join("CODEOWNERS"))
        }

        fn read_rule_file(&self, path: &Path) -> Result<String, LoadError> {
            self.reads.set(self.reads.get() + 1);
            let base_dir = path.parent().unwrap_or(path);
            self.files.get(base_dir).cloned().ok_or_else(|| {
                LoadError::read(path, io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            })
        }
    }

    fn project_root(_project: &Path, _file: &Path) -> Option<PathBuf> {
        Some(PathBuf::from("/repo"))
    }

    fn module_dir(_project: &Path, file: &Path) -> Option<PathBuf> {
        if file.starts_with("/repo/module") {
            Some(PathBuf::from("/repo/module"))
        } else {
            Some(PathBuf::from("/repo"))
        }
    }

    fn no_base_dir(_project: &Path, _file: &Path) -> Option<PathBuf> {
        None
    }

    const SCENARIO: &str = "*       @org/default-team\n\
                            /docs/  @org/docs-team\n\
                            *.go    @org/go-team\n";

    fn owners(outcome: &ResolutionOutcome) -> Vec<String> {
        outcome.rule().map(|r| r.owners.clone()).unwrap_or_default()
    }

    #[test]
    fn scenario_last_match_wins_with_abbreviated_owners() {
        let source = MemorySource::default().with("/repo", SCENARIO);
        let mut resolver = CodeOwnersResolver::with_collaborators(source, project_root);
        let project = Path::new("/repo");

        let docs = resolver.get_file_code_owner_state(project, Path::new("/repo/docs/readme.md"));
        assert_eq!(owners(&docs), vec!["docs-team"]);
        assert_eq!(resolver.owner_prefix().as_str(), "@org/");
        assert_eq!(resolver.get_true_code_owner("docs-team"), "@org/docs-team");

        let go = resolver.get_file_code_owner_state(project, Path::new("/repo/src/main.go"));
        assert_eq!(owners(&go), vec!["go-team"]);
        assert_eq!(go.rule().unwrap().line_number, 2);

        let py = resolver.get_file_code_owner_state(project, Path::new("/repo/src/main.py"));
        assert_eq!(owners(&py), vec!["default-team"]);
        assert_eq!(
            resolver.true_owners(py.rule().unwrap()),
            vec!["@org/default-team"]
        );
    }

    #[test]
    fn rule_file_is_loaded_once() {
        let source = MemorySource::default().with("/repo", SCENARIO);
        let mut resolver = CodeOwnersResolver::with_collaborators(source, project_root);
        let project = Path::new("/repo");

        for _ in 0..3 {
            resolver.get_file_code_owner_state(project, Path::new("/repo/a.go"));
        }
        assert_eq!(resolver.source.reads.get(), 1);
        assert_eq!(resolver.table().globs_for(project).len(), 3);
    }

    #[test]
    fn no_rule_file_found() {
        let mut resolver =
            CodeOwnersResolver::with_collaborators(MemorySource::default(), project_root);
        let outcome =
            resolver.get_file_code_owner_state(Path::new("/repo"), Path::new("/repo/a.rs"));
        assert_eq!(outcome, ResolutionOutcome::NoRuleFileFound);
        assert!(!outcome.is_owned());
    }

    #[test]
    fn no_match_in_rule_file() {
        let source = MemorySource::default().with("/repo", "/docs/ @docs\n");
        let mut resolver = CodeOwnersResolver::with_collaborators(source, project_root);
        let outcome =
            resolver.get_file_code_owner_state(Path::new("/repo"), Path::new("/repo/a.rs"));
        assert_eq!(outcome, ResolutionOutcome::NoMatchInRuleFile);
    }

    #[test]
    fn empty_rule_file_counts_as_found() {
        let source = MemorySource::default().with("/repo", "# nothing here\n");
        let mut resolver = CodeOwnersResolver::with_collaborators(source, project_root);
        let outcome =
            resolver.get_file_code_owner_state(Path::new("/repo"), Path::new("/repo/a.rs"));
        assert_eq!(outcome, ResolutionOutcome::NoMatchInRuleFile);
    }

    #[test]
    fn unreadable_rule_file_is_treated_as_absent() {
        let source = MemorySource::default().unreadable("/repo");
        let mut resolver = CodeOwnersResolver::with_collaborators(source, project_root);
        let outcome =
            resolver.get_file_code_owner_state(Path::new("/repo"), Path::new("/repo/a.rs"));
        assert_eq!(outcome, ResolutionOutcome::NoRuleFileFound);

        // Retried on the next lookup
        resolver.get_file_code_owner_state(Path::new("/repo"), Path::new("/repo/a.rs"));
        assert_eq!(resolver.source.reads.get(), 2);
    }

    #[test]
    fn missing_base_dir_still_uses_project_rules() {
        let source = MemorySource::default().with("/repo", "* @a\n");
        let mut resolver = CodeOwnersResolver::with_collaborators(source, no_base_dir);
        let outcome = resolver.get_file_code_owner_state(Path::new("/repo"), Path::new("/repo/x"));
        assert_eq!(owners(&outcome), vec!["@a"]);
    }

    #[test]
    fn nested_rule_file_overrides_project_consistently() {
        let source = MemorySource::default()
            .with("/repo", "* @org/root\n")
            .with("/repo/module", "*.rs @org/module\n");
        let mut resolver = CodeOwnersResolver::with_collaborators(source, module_dir);
        let project = Path::new("/repo");
        let file = Path::new("/repo/module/lib.rs");

        for _ in 0..2 {
            let outcome = resolver.get_file_code_owner_state(project, file);
            let rule = outcome.rule().unwrap();
            assert_eq!(rule.pattern, "*.rs");
            assert_eq!(
                resolver.get_code_owner_file_for_rule(rule),
                Some(PathBuf::from("/repo/module/CODEOWNERS"))
            );
            assert_eq!(resolver.true_owners(rule), vec!["@org/module"]);
        }

        let readme =
            resolver.get_file_code_owner_state(project, Path::new("/repo/module/README.md"));
        assert_eq!(readme.rule().unwrap().pattern, "*");
        assert_eq!(resolver.table().len(), 2);
    }

    #[test]
    fn refresh_reloads_only_project_rules() {
        let source = MemorySource::default()
            .with("/repo", "* @root\n")
            .with("/repo/module", "*.rs @module\n");
        let mut resolver = CodeOwnersResolver::with_collaborators(source, module_dir);
        let project = Path::new("/repo");

        resolver.get_file_code_owner_state(project, Path::new("/repo/module/lib.rs"));
        assert_eq!(resolver.table().len(), 2);

        resolver.refresh_code_owner_rules(project);
        assert_eq!(resolver.table().len(), 1);
        assert!(resolver.table().has_handle_for(project));
        assert!(!resolver.table().has_handle_for(Path::new("/repo/module")));

        let outcome = resolver.get_file_code_owner_state(project, Path::new("/repo/module/lib.rs"));
        assert_eq!(owners(&outcome), vec!["@module"]);
    }

    #[test]
    fn ensure_loaded_reports_availability() {
        let source = MemorySource::default().with("/repo", "* @a\n");
        let mut resolver = CodeOwnersResolver::with_collaborators(source, project_root);

        assert!(resolver.ensure_loaded(Path::new("/repo")));
        assert!(resolver.ensure_loaded(Path::new("/repo")));
        assert!(!resolver.ensure_loaded(Path::new("/other")));
        assert_eq!(resolver.source.reads.get(), 1);
    }

    #[test]
    fn rule_file_for_unknown_rule() {
        let resolver =
            CodeOwnersResolver::with_collaborators(MemorySource::default(), project_root);
        assert!(resolver
            .get_code_owner_file_for_rule(&Rule::new(0, "*", vec!["@a".to_string()]))
            .is_none());
    }

    #[test]
    fn owner_prefix_round_trip() {
        let content = "* @org/team-a @org/sub/x\n*.md @org/team-b\n";
        let source = MemorySource::default().with("/repo", content);
        let mut resolver = CodeOwnersResolver::with_collaborators(source, project_root);
        assert!(resolver.ensure_loaded(Path::new("/repo")));

        assert_eq!(resolver.owner_prefix().as_str(), "@org/");
        for (original, loaded) in parse_rules(content)
            .iter()
            .zip(resolver.table().globs_for(Path::new("/repo")))
        {
            for (full, short) in original.owners.iter().zip(&loaded.rule().owners) {
                assert_eq!(&resolver.get_true_code_owner(short), full);
            }
        }
    }

    #[test]
    fn outcome_serializes_with_state_tag() {
        let outcome =
            ResolutionOutcome::RuleMatched(Rule::new(1, "*.rs", vec!["rust".to_string()]));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["state"], "rule_matched");
        assert_eq!(json["rule"]["pattern"], "*.rs");

        let json = serde_json::to_value(ResolutionOutcome::NoRuleFileFound).unwrap();
        assert_eq!(json["state"], "no_rule_file_found");
    }

    #[test]
    fn project_rules_load_before_nested_match() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("module")).unwrap();
        fs::write(root.join("CODEOWNERS"), "* @root\n").unwrap();
        fs::write(root.join("module/CODEOWNERS"), "*.rs @module\n").unwrap();

        let mut resolver = CodeOwnersResolver::new();
        let outcome = resolver.get_file_code_owner_state(root, &root.join("module/lib.rs"));

        assert_eq!(owners(&outcome), vec!["@module"]);
        assert!(resolver.table().has_handle_for(root));
        assert!(resolver.table().has_handle_for(&root.join("module")));
        assert_eq!(resolver.table().len(), 2);
    }

    #[test]
    fn filesystem_resolver() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".github")).unwrap();
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join(".github/CODEOWNERS"), SCENARIO).unwrap();

        let mut resolver = CodeOwnersResolver::new();
        let outcome = resolver.get_file_code_owner_state(root, &root.join("docs/readme.md"));
        let rule = outcome.rule().unwrap();
        assert_eq!(rule.owners, vec!["docs-team"]);
        assert_eq!(
            resolver.get_code_owner_file_for_rule(rule),
            Some(root.join(".github/CODEOWNERS"))
        );

        let outside =
            resolver.get_file_code_owner_state(root, Path::new("/definitely/elsewhere.rs"));
        assert_eq!(outside, ResolutionOutcome::NoMatchInRuleFile);
    }
}
