//! Repository identity detection for svndiff.
//!
//! Everything downstream of the diff needs to know which repository the
//! working copy belongs to and where the working copy sits inside it. Both
//! are read from `svn info` output: the root URL, the working copy's URL
//! (whose offset under the root is the base path), and the repository UUID.

use crate::error::{Result, SvnDiffError};
use crate::svn::SvnClient;
use regex::Regex;
use std::sync::LazyLock;

static ROOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Repository Root: (.+)$").expect("invalid root regex"));
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^URL: (.+)$").expect("invalid URL regex"));
static UUID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Repository UUID: (.+)$").expect("invalid UUID regex"));

/// Identity of an svn repository and the working copy's offset within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryInfo {
    /// Repository root URL.
    pub path: String,

    /// Offset of the working copy (or requested target) under the root.
    ///
    /// Always starts with `/`; `/` alone means the working copy is the
    /// whole repository.
    pub base_path: String,

    /// Repository UUID.
    pub uuid: String,
}

impl RepositoryInfo {
    /// Create repository info from already-known fields.
    pub fn new(
        path: impl Into<String>,
        base_path: impl Into<String>,
        uuid: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            base_path: base_path.into(),
            uuid: uuid.into(),
        }
    }

    /// Override the base path for this diff run.
    ///
    /// Used in explicit-URL mode when the command line names a target path
    /// inside the repository. May be applied at most once, before the diff
    /// is generated.
    pub fn set_base_path(&mut self, base_path: impl Into<String>) {
        self.base_path = base_path.into();
    }

    /// Detect repository info via the svn client.
    ///
    /// # Arguments
    ///
    /// * `client` - The svn client to query with
    /// * `url` - Explicit repository URL, or `None` for the working copy
    pub fn detect(client: &SvnClient, url: Option<&str>) -> Result<Self> {
        let text = client.info_text(url)?;
        Self::from_info_output(&text)
    }

    /// Parse repository info out of raw `svn info` output.
    ///
    /// # Returns
    ///
    /// * `Ok(RepositoryInfo)` - All three fields found
    /// * `Err(SvnDiffError::RepositoryError)` - Any field missing (exit code 2)
    pub fn from_info_output(text: &str) -> Result<Self> {
        let path = capture(&ROOT_RE, text)
            .ok_or_else(|| missing_field("Repository Root"))?;
        let url = capture(&URL_RE, text).ok_or_else(|| missing_field("URL"))?;
        let uuid = capture(&UUID_RE, text)
            .ok_or_else(|| missing_field("Repository UUID"))?;

        // A working copy checked out at the root has URL == root; its base
        // path is "/" rather than the empty string.
        let rel = url.strip_prefix(path.as_str()).unwrap_or("");
        let base_path = if rel.is_empty() {
            "/".to_string()
        } else {
            rel.to_string()
        };

        Ok(Self {
            path,
            base_path,
            uuid,
        })
    }
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|c| c[1].to_string())
}

fn missing_field(field: &str) -> SvnDiffError {
    SvnDiffError::RepositoryError(format!(
        "no '{}' in svn info output (is this an svn working copy or URL?)",
        field
    ))
}
