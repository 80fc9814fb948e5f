//! Configuration model for svndiff.
//!
//! An optional `.svndiff.yaml` tunes how the svn binary is invoked. The
//! file is discovered by walking parent directories from the working
//! directory, so one config at a checkout root covers every subdirectory;
//! absence means defaults. Unknown fields are ignored for forward
//! compatibility.

use crate::error::{Result, SvnDiffError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the config file searched for in parent directories.
pub const CONFIG_FILE_NAME: &str = ".svndiff.yaml";

/// Configuration for svndiff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Svn binary to invoke (default: "svn").
    #[serde(default = "default_svn_binary")]
    pub svn_binary: String,

    /// External diff command passed to svn as `--diff-cmd` (default: "diff").
    #[serde(default = "default_diff_cmd")]
    pub diff_cmd: String,

    /// Default for `--show-copies-as-adds` when the flag is not given.
    #[serde(default)]
    pub show_copies_as_adds: Option<bool>,
}

fn default_svn_binary() -> String {
    "svn".to_string()
}
fn default_diff_cmd() -> String {
    "diff".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            svn_binary: default_svn_binary(),
            diff_cmd: default_diff_cmd(),
            show_copies_as_adds: None,
        }
    }
}

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the config file
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(SvnDiffError::UserError)` - Read, parse, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SvnDiffError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward
    /// compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| SvnDiffError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    pub fn validate(&self) -> Result<()> {
        if self.svn_binary.is_empty() {
            return Err(SvnDiffError::UserError(
                "config validation failed: svn_binary must be non-empty".to_string(),
            ));
        }

        if self.diff_cmd.is_empty() {
            return Err(SvnDiffError::UserError(
                "config validation failed: diff_cmd must be non-empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Find and load the nearest config file at or above `start`.
    ///
    /// Walks parent directories until the filesystem root; when no
    /// config file exists anywhere up the tree, the defaults apply.
    pub fn discover<P: AsRef<Path>>(start: P) -> Result<Self> {
        let mut dir = Some(start.as_ref());

        while let Some(current) = dir {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Self::load(candidate);
            }
            dir = current.parent();
        }

        Ok(Self::default())
    }
}
