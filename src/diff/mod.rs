//! Diff repair pipeline for svndiff.
//!
//! `svn diff` output is post-processed in two sequential passes:
//!
//! - `renames`: rewrite `---` headers for files that came into being via
//!   `svn cp`/`svn mv`, tracing the copy origin through per-path metadata
//! - `absolute`: convert header paths to absolute repository paths,
//!   handling working copies switched to other parts of the repository
//!
//! The passes are independent and composable. Each one re-classifies lines
//! by pattern match and passes everything it does not recognize through
//! byte-identical, so text that is not an svn diff header survives both
//! passes unchanged.

pub mod absolute;
pub mod headers;
pub mod renames;

use crate::repository::RepositoryInfo;
use std::collections::HashMap;

/// Per-path metadata source backing rename detection and path
/// normalization.
///
/// Production wires the svn client (one `svn info <path>` per call); tests
/// substitute an in-memory table. `None` means svn has no metadata for the
/// path (unversioned, or a status-only change) and is always a soft miss,
/// never an error.
pub trait InfoLookup {
    fn path_info(&self, path: &str) -> Option<HashMap<String, String>>;
}

/// Run the full repair pipeline over raw diff text.
///
/// `explicit_url` selects explicit-URL mode: rename detection is skipped
/// (URL-to-URL diffs already report moves correctly) and absolutization
/// uses base-path offset arithmetic instead of per-path lookups.
pub fn post_process<L: InfoLookup>(
    diff: &str,
    lookup: &L,
    repository: &RepositoryInfo,
    explicit_url: bool,
) -> String {
    let lines: Vec<String> = diff.split_inclusive('\n').map(str::to_string).collect();

    let lines = renames::rewrite_renames(lines, lookup, explicit_url);
    let lines = absolute::absolutize_paths(lines, lookup, repository, explicit_url);

    lines.concat()
}
