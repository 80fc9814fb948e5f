//! Diff header classification and filename parsing.
//!
//! `svn diff` control lines come in three forms: `Index:` lines and the
//! `---`/`+++` file lines with a parenthesized revision component.
//! Classification is by pattern match on the text alone, so the same line
//! can be re-classified on every pass.

use regex::Regex;
use std::sync::LazyLock;

/// Matches the original-file control line of an svn diff header.
pub static ORIG_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^---\s+.*\s+\(.*\)").expect("invalid orig-file regex"));

/// Matches the new-file control line of an svn diff header.
pub static NEW_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+\+\+\s+.*\s+\(.*\)").expect("invalid new-file regex"));

/// Prefix of index control lines.
pub const INDEX_PREFIX: &str = "Index: ";

static MULTI_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("  +").expect("invalid multi-space regex"));

/// Split a header line's trailing content into filename and metadata
/// suffix.
///
/// The input is everything after the `---`/`+++` marker and its following
/// whitespace. The separator between filename and revision info is either
/// a tab or a run of spaces, depending on where the diff came from:
///
/// - A tab is unambiguous and wins, even for filenames containing spaces.
///   Only the first tab separates; the info portion may contain more.
/// - Otherwise a run of two or more spaces is assumed to be the
///   separator. Single spaces never split, since directory and file names
///   with single spaces are common. A filename that itself contains two
///   consecutive spaces will misparse; the source format does not allow
///   disambiguating that case.
///
/// The returned suffix starts with a canonical tab, or is a bare newline
/// when no metadata is present. Re-joining filename and suffix reproduces
/// semantically equivalent header content.
pub fn parse_filename_header(s: &str) -> (String, String) {
    if let Some((file, rest)) = s.split_once('\t') {
        return (file.to_string(), format!("\t{}", rest));
    }

    if MULTI_SPACE_RE.is_match(s) {
        let mut parts = MULTI_SPACE_RE.splitn(s, 2);
        let file = parts.next().unwrap_or("");
        let rest = parts.next().unwrap_or("");
        return (file.to_string(), format!("\t{}", rest));
    }

    // No separator at all: the content is just the filename.
    let file = s.split('\n').next().unwrap_or("");
    (file.to_string(), "\n".to_string())
}
