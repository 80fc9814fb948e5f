use crate::diff::InfoLookup;
use std::collections::HashMap;

/// In-memory metadata table standing in for `svn info`.
///
/// Paths not inserted at all report as misses (`None`), matching svn's
/// behavior for unversioned paths; `insert_empty` registers a path that
/// exists but carries no interesting keys.
pub(crate) struct StaticInfo {
    entries: HashMap<String, HashMap<String, String>>,
}

impl StaticInfo {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Record one metadata key for a path.
    pub(crate) fn insert(&mut self, path: &str, key: &str, value: &str) {
        self.entries
            .entry(path.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Record a path that is known to svn but has no metadata of interest.
    pub(crate) fn insert_empty(&mut self, path: &str) {
        self.entries.entry(path.to_string()).or_default();
    }
}

impl InfoLookup for StaticInfo {
    fn path_info(&self, path: &str) -> Option<HashMap<String, String>> {
        self.entries.get(path).cloned()
    }
}
