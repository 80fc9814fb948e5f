//! CLI argument parsing for svndiff.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Svndiff: repairs and normalizes `svn diff` output for code review upload.
///
/// `svn diff` headers are syntactically valid but semantically incomplete:
/// files created by `svn cp`/`svn mv` do not record their origin, and a
/// switched working copy reports paths relative to the checkout rather
/// than the repository. Svndiff reconstructs both before the diff leaves
/// the machine.
#[derive(Parser, Debug)]
#[command(name = "svndiff")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Echo executed svn commands to stderr.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for svndiff.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a repaired diff for review.
    ///
    /// Runs `svn diff`, rewrites `---` headers for files created by
    /// copy/move, and converts header paths to absolute repository paths.
    Diff(DiffArgs),

    /// Show detected repository information.
    ///
    /// Prints the repository root URL, base path, and UUID for the
    /// working copy or an explicit repository URL.
    Info(InfoArgs),
}

/// Arguments for the `diff` command.
#[derive(Parser, Debug)]
pub struct DiffArgs {
    /// Files or paths to restrict the diff to.
    ///
    /// In explicit-URL mode a single path overrides the repository base
    /// path instead of restricting the diff.
    pub files: Vec<String>,

    /// Revision range to diff (e.g. "100:HEAD" or "100").
    #[arg(short = 'r', long = "revision-range")]
    pub revision_range: Option<String>,

    /// Diff between two repository URLs instead of the working copy.
    ///
    /// Requires --revision-range.
    #[arg(long)]
    pub repository_url: Option<String>,

    /// Diff only the files in a named changelist.
    #[arg(long)]
    pub changelist: Option<String>,

    /// Report copied files as plain additions instead of tracing history.
    ///
    /// Required one way or the other when the changeset has history
    /// scheduled with commit.
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    pub show_copies_as_adds: Option<bool>,

    /// Write the diff to a file instead of stdout.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `info` command.
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Repository URL to inspect instead of the working copy.
    #[arg(long)]
    pub repository_url: Option<String>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_diff_minimal() {
        let cli = Cli::try_parse_from(["svndiff", "diff"]).unwrap();
        assert!(!cli.debug);
        if let Command::Diff(args) = cli.command {
            assert!(args.files.is_empty());
            assert_eq!(args.revision_range, None);
            assert_eq!(args.repository_url, None);
            assert_eq!(args.changelist, None);
            assert_eq!(args.show_copies_as_adds, None);
            assert_eq!(args.output, None);
        } else {
            panic!("Expected Diff command");
        }
    }

    #[test]
    fn parse_diff_with_files() {
        let cli = Cli::try_parse_from(["svndiff", "diff", "src/a.py", "src/b.py"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.files, vec!["src/a.py", "src/b.py"]);
        } else {
            panic!("Expected Diff command");
        }
    }

    #[test]
    fn parse_diff_revision_range() {
        let cli = Cli::try_parse_from(["svndiff", "diff", "-r", "100:HEAD"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.revision_range, Some("100:HEAD".to_string()));
        } else {
            panic!("Expected Diff command");
        }
    }

    #[test]
    fn parse_diff_repository_url() {
        let cli = Cli::try_parse_from([
            "svndiff",
            "diff",
            "--repository-url",
            "http://svn.example.com/repo",
            "--revision-range",
            "100:200",
        ])
        .unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(
                args.repository_url,
                Some("http://svn.example.com/repo".to_string())
            );
            assert_eq!(args.revision_range, Some("100:200".to_string()));
        } else {
            panic!("Expected Diff command");
        }
    }

    #[test]
    fn parse_diff_changelist() {
        let cli = Cli::try_parse_from(["svndiff", "diff", "--changelist", "my-change"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.changelist, Some("my-change".to_string()));
        } else {
            panic!("Expected Diff command");
        }
    }

    #[test]
    fn parse_diff_show_copies_as_adds() {
        let cli =
            Cli::try_parse_from(["svndiff", "diff", "--show-copies-as-adds", "true"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.show_copies_as_adds, Some(true));
        } else {
            panic!("Expected Diff command");
        }

        let cli =
            Cli::try_parse_from(["svndiff", "diff", "--show-copies-as-adds", "false"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.show_copies_as_adds, Some(false));
        } else {
            panic!("Expected Diff command");
        }
    }

    #[test]
    fn parse_diff_output_file() {
        let cli = Cli::try_parse_from(["svndiff", "diff", "-o", "review.diff"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.output, Some(PathBuf::from("review.diff")));
        } else {
            panic!("Expected Diff command");
        }
    }

    #[test]
    fn parse_global_debug_flag() {
        let cli = Cli::try_parse_from(["svndiff", "diff", "--debug"]).unwrap();
        assert!(cli.debug);
    }

    #[test]
    fn parse_info() {
        let cli = Cli::try_parse_from(["svndiff", "info"]).unwrap();
        if let Command::Info(args) = cli.command {
            assert_eq!(args.repository_url, None);
        } else {
            panic!("Expected Info command");
        }
    }

    #[test]
    fn parse_info_with_url() {
        let cli = Cli::try_parse_from([
            "svndiff",
            "info",
            "--repository-url",
            "http://svn.example.com/repo",
        ])
        .unwrap();
        if let Command::Info(args) = cli.command {
            assert_eq!(
                args.repository_url,
                Some("http://svn.example.com/repo".to_string())
            );
        } else {
            panic!("Expected Info command");
        }
    }
}
