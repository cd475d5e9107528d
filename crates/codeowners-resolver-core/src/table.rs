//! The rule resolution table.
//!
//! The table holds the compiled rules of every loaded rule file, keyed by the
//! base directory the file governs. Within one rule file, rules keep their
//! file order, which is what "last matching rule wins" relies on.
//!
//! When several rule files are loaded, they are searched from the shallowest
//! base directory to the deepest, so a rule from a nested rule file takes
//! precedence over any rule of an enclosing one.

use crate::matching::CompiledGlob;
use crate::parse::Rule;
use crate::prefix::OwnerPrefix;
use log::debug;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// Identifies one rule file and the directory it governs.
///
/// Two handles are equal iff they govern the same base directory.
#[derive(Debug, Clone)]
pub struct RuleFileHandle {
    file: PathBuf,
    base_dir: PathBuf,
}

impl RuleFileHandle {
    /// Creates a handle for `file` governing `base_dir`.
    pub fn new(file: impl Into<PathBuf>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            base_dir: base_dir.into(),
        }
    }

    /// Returns the path of the rule file.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Returns the directory the rule file governs.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl PartialEq for RuleFileHandle {
    fn eq(&self, other: &Self) -> bool {
        self.base_dir == other.base_dir
    }
}

impl Eq for RuleFileHandle {}

impl Hash for RuleFileHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base_dir.hash(state);
    }
}

#[derive(Debug)]
struct Entry {
    handle: RuleFileHandle,
    prefix: OwnerPrefix,
    globs: Vec<CompiledGlob>,
    /// Rules already in `globs`, for duplicate suppression.
    seen: HashSet<Rule>,
}

impl Entry {
    fn new(handle: RuleFileHandle) -> Self {
        Self {
            handle,
            prefix: OwnerPrefix::default(),
            globs: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn last_match(&self, path: &Path) -> Option<&CompiledGlob> {
        self.globs.iter().rev().find(|glob| glob.matches(path))
    }
}

/// Search order of base directories: shallowest first, then by path.
fn search_key(base_dir: &Path) -> (usize, &Path) {
    (base_dir.components().count(), base_dir)
}

/// Compiled rules of every loaded rule file.
#[derive(Debug, Default)]
pub struct ResolutionTable {
    /// Entries sorted by [`search_key`].
    entries: Vec<Entry>,
}

impl ResolutionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, base_dir: &Path) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|entry| entry.handle.base_dir == base_dir)
    }

    fn entry_mut(&mut self, handle: RuleFileHandle) -> &mut Entry {
        let key = search_key(&handle.base_dir);
        let position = self
            .entries
            .binary_search_by(|entry| search_key(&entry.handle.base_dir).cmp(&key));

        let idx = match position {
            Ok(idx) => {
                // Keep the most recently loaded rule file
                self.entries[idx].handle = handle;
                idx
            }
            Err(idx) => {
                debug!(
                    "New rule file handle {:?} for {:?}",
                    handle.file, handle.base_dir
                );
                self.entries.insert(idx, Entry::new(handle));
                idx
            }
        };
        &mut self.entries[idx]
    }

    /// Adds `rules` to the glob set of `handle`, compiling them against the
    /// handle's base directory.
    ///
    /// The set is created on first use. Rules are appended in the given
    /// order and rules already present are skipped. Returns the number of
    /// rules added.
    pub fn put<I>(&mut self, handle: RuleFileHandle, rules: I) -> usize
    where
        I: IntoIterator<Item = Rule>,
    {
        let entry = self.entry_mut(handle);
        let mut added = 0;

        for rule in rules {
            if entry.seen.contains(&rule) {
                continue;
            }
            entry.seen.insert(rule.clone());
            entry
                .globs
                .push(CompiledGlob::new(rule, entry.handle.base_dir.clone()));
            added += 1;
        }

        debug!(
            "Added {} rule(s) for {:?} ({} total)",
            added,
            entry.handle.base_dir,
            entry.globs.len()
        );
        added
    }

    /// Records the owner prefix that was stripped from the rules of the
    /// handle governing `base_dir`.
    pub fn set_owner_prefix(&mut self, base_dir: &Path, prefix: OwnerPrefix) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.handle.base_dir == base_dir)
        {
            entry.prefix = prefix;
        }
    }

    /// Returns the owner prefix recorded for the handle governing `base_dir`.
    pub fn owner_prefix_for(&self, base_dir: &Path) -> Option<&OwnerPrefix> {
        self.entry(base_dir).map(|entry| &entry.prefix)
    }

    /// Returns the last glob matching `path` across all handles.
    pub fn lookup(&self, path: &Path) -> Option<&CompiledGlob> {
        self.entries
            .iter()
            .rev()
            .find_map(|entry| entry.last_match(path))
    }

    /// Returns the last glob matching `path` among the rules of the handle
    /// governing `base_dir`.
    pub fn lookup_in(&self, base_dir: &Path, path: &Path) -> Option<&CompiledGlob> {
        self.entry(base_dir)?.last_match(path)
    }

    /// Returns the rule file whose glob set contains `rule`.
    pub fn reverse_lookup(&self, rule: &Rule) -> Option<&Path> {
        self.entries
            .iter()
            .find(|entry| entry.seen.contains(rule))
            .map(|entry| entry.handle.file())
    }

    /// Returns the handle that contains `rule`.
    pub fn handle_for_rule(&self, rule: &Rule) -> Option<&RuleFileHandle> {
        self.entries
            .iter()
            .find(|entry| entry.seen.contains(rule))
            .map(|entry| &entry.handle)
    }

    /// Returns true if a handle governs `base_dir`.
    pub fn has_handle_for(&self, base_dir: &Path) -> bool {
        self.entry(base_dir).is_some()
    }

    /// Returns the compiled globs of the handle governing `base_dir`, in
    /// file order.
    pub fn globs_for(&self, base_dir: &Path) -> &[CompiledGlob] {
        self.entry(base_dir)
            .map(|entry| entry.globs.as_slice())
            .unwrap_or_default()
    }

    /// Returns all handles in search order.
    pub fn handles(&self) -> impl Iterator<Item = &RuleFileHandle> {
        self.entries.iter().map(|entry| &entry.handle)
    }

    /// Drops all handles and their rules.
    pub fn clear(&mut self) {
        debug!("Clearing {} rule file handle(s)", self.entries.len());
        self.entries.clear();
    }

    /// Returns the number of handles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no handle is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
