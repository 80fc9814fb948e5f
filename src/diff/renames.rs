//! Copy-origin resolution and rename repair.
//!
//! When a file came into being via `svn mv`/`svn cp`, the hunks `svn diff`
//! emits are relative to the origin file, but the `---` header names the
//! new path. This pass rewrites those headers to name the origin so the
//! receiving review system can apply and display the change correctly.

use super::headers::{NEW_FILE_RE, ORIG_FILE_RE, parse_filename_header};
use super::InfoLookup;
use percent_encoding::percent_decode_str;

/// Join a path with an optional accumulated relative suffix.
fn smart_join(p1: &str, p2: Option<&str>) -> String {
    match p2 {
        Some(p2) => format!("{}/{}", p1, p2),
        None => p1.to_string(),
    }
}

/// Split a path on its final slash into (parent, last component).
///
/// A path without slashes has an empty parent; `/x` has parent `/`.
fn split_last(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(0) => ("/", &path[1..]),
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}

/// Resolve the copy origin of `path`, if any.
///
/// Svn reports "Copied From URL" only on the exact path that was copied.
/// When the file arrived as part of a copied parent directory, only that
/// directory's metadata carries the origin, so the search ascends from the
/// path one component at a time, re-appending the descended components
/// onto whatever origin is found. The first level with copy info wins; a
/// level with no metadata, or with copy info but no repository root, is
/// skipped and the ascent continues. Terminates at the filesystem root.
pub fn find_copy_origin<L: InfoLookup>(lookup: &L, path: &str) -> Option<String> {
    let mut path1 = path.to_string();
    let mut path2: Option<String> = None;

    while !path1.is_empty() {
        let info = lookup.path_info(&path1).unwrap_or_default();

        if let (Some(url), Some(root)) =
            (info.get("Copied From URL"), info.get("Repository Root"))
        {
            let from_path = url.strip_prefix(root.as_str()).unwrap_or(url.as_str());
            let from_path = percent_decode_str(from_path).decode_utf8_lossy();
            return Some(smart_join(&from_path, path2.as_deref()));
        }

        let (parent, last) = split_last(&path1);
        if parent.is_empty() || parent == "/" {
            break;
        }
        path2 = Some(smart_join(last, path2.as_deref()));
        path1 = parent.to_string();
    }

    None
}

/// Rewrite `---` headers whose file was created by copy/move.
///
/// With `skip` set (explicit-URL mode) the input is returned unchanged:
/// diffing between two repository URLs at fixed revisions already reports
/// moves correctly, and rewriting would corrupt correct output.
///
/// Otherwise the most recent `---` header is held back until the `+++`
/// line that answers it arrives; the new file's copy origin (if any) is
/// then substituted into the held line. Output always has exactly as many
/// lines as the input, and only `---` lines are ever altered.
pub fn rewrite_renames<L: InfoLookup>(
    lines: Vec<String>,
    lookup: &L,
    skip: bool,
) -> Vec<String> {
    if skip {
        return lines;
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut from_line: Option<String> = None;

    for line in lines {
        if ORIG_FILE_RE.is_match(&line) {
            // An unanswered `---` line cannot name a copy; emit it before
            // holding the new one.
            if let Some(pending) = from_line.replace(line) {
                result.push(pending);
            }
            continue;
        }

        if NEW_FILE_RE.is_match(&line) {
            if let Some(pending) = from_line.take() {
                let (to_file, _) = parse_filename_header(&line[4..]);
                match find_copy_origin(lookup, &to_file) {
                    Some(origin) => result.push(pending.replace(&to_file, &origin)),
                    None => result.push(pending),
                }
            }
            result.push(line);
            continue;
        }

        result.push(line);
    }

    // Malformed input can end on a held `---` line; emit it unchanged.
    if let Some(pending) = from_line {
        result.push(pending);
    }

    result
}
