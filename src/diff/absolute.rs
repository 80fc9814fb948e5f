//! Absolute-path conversion for diff headers.
//!
//! A working copy may be switched to an arbitrary location inside the
//! repository, so a file's on-disk relative path does not necessarily
//! equal its repository path; only per-path metadata reveals the true
//! URL. Diffs taken between explicit repository URLs need no lookups at
//! all: the base-path offset was fixed for the whole run.

use super::headers::{INDEX_PREFIX, NEW_FILE_RE, ORIG_FILE_RE, parse_filename_header};
use super::InfoLookup;
use crate::repository::RepositoryInfo;
use percent_encoding::percent_decode_str;

/// Convert relative header paths to absolute repository paths.
///
/// Header lines (`---`, `+++`, `Index:`) are split into their marker and
/// remainder; a remainder already starting with `/` is left untouched, so
/// the pass is idempotent. Lines that fail to resolve (no metadata for
/// the path, or metadata missing the URL or root) pass through
/// unmodified; a single bad line never aborts the diff.
pub fn absolutize_paths<L: InfoLookup>(
    lines: Vec<String>,
    lookup: &L,
    repository: &RepositoryInfo,
    explicit_url: bool,
) -> Vec<String> {
    let mut result = Vec::with_capacity(lines.len());

    for line in lines {
        let is_header = NEW_FILE_RE.is_match(&line)
            || ORIG_FILE_RE.is_match(&line)
            || line.starts_with(INDEX_PREFIX);

        let split = if is_header { line.split_once(' ') } else { None };
        let Some((front, remainder)) = split else {
            result.push(line);
            continue;
        };

        if remainder.starts_with('/') {
            // Already absolute.
            result.push(line);
            continue;
        }

        let (file, rest) = parse_filename_header(remainder);

        let path = if explicit_url {
            // Paths in a URL-to-URL diff are relative to the base path
            // fixed for this run.
            let joined = format!("{}/{}", repository.base_path, file);
            percent_decode_str(&joined).decode_utf8_lossy().into_owned()
        } else {
            let Some(info) = lookup.path_info(&file) else {
                result.push(line);
                continue;
            };
            let (Some(url), Some(root)) = (info.get("URL"), info.get("Repository Root")) else {
                result.push(line);
                continue;
            };
            let repo_path = url.strip_prefix(root.as_str()).unwrap_or(url.as_str());
            percent_decode_str(repo_path)
                .decode_utf8_lossy()
                .into_owned()
        };

        result.push(format!("{} {}{}", front, path, rest));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StaticInfo;

    const ROOT: &str = "http://svn.example.com/repo";

    fn repo() -> RepositoryInfo {
        RepositoryInfo::new(ROOT, "/trunk", "2d22eb41-18cd-4b45-aa2a-73d24e273e89")
    }

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_explicit_url_mode_uses_base_path() {
        let lookup = StaticInfo::new();
        let input = lines(&["--- file.py\t(revision 3)\n"]);

        let result = absolutize_paths(input, &lookup, &repo(), true);
        assert_eq!(result, lines(&["--- /trunk/file.py\t(revision 3)\n"]));
    }

    #[test]
    fn test_explicit_url_mode_decodes_percent_escapes() {
        let lookup = StaticInfo::new();
        let input = lines(&["+++ name%20with%20spaces.py\t(revision 3)\n"]);

        let result = absolutize_paths(input, &lookup, &repo(), true);
        assert_eq!(
            result,
            lines(&["+++ /trunk/name with spaces.py\t(revision 3)\n"])
        );
    }

    #[test]
    fn test_working_copy_mode_uses_path_metadata() {
        // The working copy is switched: the on-disk path `file.py` really
        // lives under /branches/feature in the repository.
        let mut lookup = StaticInfo::new();
        lookup.insert("file.py", "URL", &format!("{}/branches/feature/file.py", ROOT));
        lookup.insert("file.py", "Repository Root", ROOT);

        let input = lines(&["+++ file.py\t(working copy)\n"]);
        let result = absolutize_paths(input, &lookup, &repo(), false);

        assert_eq!(
            result,
            lines(&["+++ /branches/feature/file.py\t(working copy)\n"])
        );
    }

    #[test]
    fn test_working_copy_mode_decodes_url() {
        let mut lookup = StaticInfo::new();
        lookup.insert("a b.py", "URL", &format!("{}/trunk/a%20b.py", ROOT));
        lookup.insert("a b.py", "Repository Root", ROOT);

        let input = lines(&["Index: a b.py\n"]);
        let result = absolutize_paths(input, &lookup, &repo(), false);

        assert_eq!(result, lines(&["Index: /trunk/a b.py\n"]));
    }

    #[test]
    fn test_lookup_miss_passes_line_through() {
        let lookup = StaticInfo::new();
        let input = lines(&["--- untracked.py\t(revision 0)\n"]);

        let result = absolutize_paths(input.clone(), &lookup, &repo(), false);
        assert_eq!(result, input);
    }

    #[test]
    fn test_missing_url_key_passes_line_through() {
        let mut lookup = StaticInfo::new();
        lookup.insert("file.py", "Repository Root", ROOT);

        let input = lines(&["--- file.py\t(revision 2)\n"]);
        let result = absolutize_paths(input.clone(), &lookup, &repo(), false);
        assert_eq!(result, input);
    }

    #[test]
    fn test_missing_root_key_passes_line_through() {
        let mut lookup = StaticInfo::new();
        lookup.insert("file.py", "URL", &format!("{}/trunk/file.py", ROOT));

        let input = lines(&["--- file.py\t(revision 2)\n"]);
        let result = absolutize_paths(input.clone(), &lookup, &repo(), false);
        assert_eq!(result, input);
    }

    #[test]
    fn test_absolute_paths_are_a_fixpoint() {
        let lookup = StaticInfo::new();
        let input = lines(&[
            "Index: /trunk/file.py\n",
            "--- /trunk/file.py\t(revision 2)\n",
            "+++ /trunk/file.py\t(working copy)\n",
        ]);

        let once = absolutize_paths(input.clone(), &lookup, &repo(), false);
        assert_eq!(once, input);

        let twice = absolutize_paths(once.clone(), &lookup, &repo(), true);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_index_line_is_rewritten() {
        let mut lookup = StaticInfo::new();
        lookup.insert("file.py", "URL", &format!("{}/trunk/file.py", ROOT));
        lookup.insert("file.py", "Repository Root", ROOT);

        let input = lines(&["Index: file.py\n"]);
        let result = absolutize_paths(input, &lookup, &repo(), false);
        assert_eq!(result, lines(&["Index: /trunk/file.py\n"]));
    }

    #[test]
    fn test_non_header_lines_pass_through() {
        let lookup = StaticInfo::new();
        let input = lines(&[
            "@@ -1,3 +1,3 @@\n",
            " context\n",
            "-removed\n",
            "+added\n",
            "=========\n",
            "--- not a header without revision info\n",
        ]);

        let result = absolutize_paths(input.clone(), &lookup, &repo(), false);
        assert_eq!(result, input);
    }

    #[test]
    fn test_metadata_suffix_preserved_verbatim() {
        let lookup = StaticInfo::new();
        let input = lines(&["--- file.py\t(revision 3)\textra\ttabs\n"]);

        let result = absolutize_paths(input, &lookup, &repo(), true);
        assert_eq!(
            result,
            lines(&["--- /trunk/file.py\t(revision 3)\textra\ttabs\n"])
        );
    }
}
