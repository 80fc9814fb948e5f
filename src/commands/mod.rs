//! Command implementations for svndiff.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the option cross-validation that must happen
//! before any svn process is spawned.

use crate::cli::{Cli, Command, DiffArgs, InfoArgs};
use crate::config::Config;
use crate::diff;
use crate::error::{Result, SvnDiffError};
use crate::repository::RepositoryInfo;
use crate::svn::SvnClient;
use std::env;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Diff(args) => cmd_diff(args, cli.debug),
        Command::Info(args) => cmd_info(args, cli.debug),
    }
}

fn load_config() -> Result<Config> {
    let cwd = env::current_dir().map_err(|e| {
        SvnDiffError::UserError(format!("failed to get current working directory: {}", e))
    })?;
    Config::discover(cwd)
}

fn cmd_diff(args: DiffArgs, debug: bool) -> Result<()> {
    check_diff_options(&args)?;

    let config = load_config()?;
    let client = SvnClient::new(&config.svn_binary, debug);

    let (diff_text, repository, explicit_url) = if args.repository_url.is_some() {
        run_url_diff(&client, &config, &args)?
    } else {
        run_working_copy_diff(&client, &config, &args)?
    };

    let repaired = diff::post_process(&diff_text, &client, &repository, explicit_url);
    write_output(&args, &repaired)
}

fn cmd_info(args: InfoArgs, debug: bool) -> Result<()> {
    let config = load_config()?;
    let client = SvnClient::new(&config.svn_binary, debug);
    let repository = RepositoryInfo::detect(&client, args.repository_url.as_deref())?;

    println!("Repository root: {}", repository.path);
    println!("Base path:       {}", repository.base_path);
    println!("UUID:            {}", repository.uuid);
    Ok(())
}

/// Reject option combinations before any svn process is spawned.
///
/// An explicit-URL diff has no working copy to consult, so the revision
/// range is the only way to say what to compare.
fn check_diff_options(args: &DiffArgs) -> Result<()> {
    if args.repository_url.is_some() && args.revision_range.is_none() {
        return Err(SvnDiffError::UserError(
            "--repository-url requires --revision-range".to_string(),
        ));
    }
    Ok(())
}

/// Diff two repository URLs at fixed revisions.
fn run_url_diff(
    client: &SvnClient,
    config: &Config,
    args: &DiffArgs,
) -> Result<(String, RepositoryInfo, bool)> {
    let Some(url) = args.repository_url.as_deref() else {
        return Err(SvnDiffError::UserError(
            "--repository-url requires --revision-range".to_string(),
        ));
    };
    let Some(range) = args.revision_range.as_deref() else {
        return Err(SvnDiffError::UserError(
            "--repository-url requires --revision-range".to_string(),
        ));
    };

    let mut repository = RepositoryInfo::detect(client, Some(url))?;

    // A single positional argument re-targets the base path; two or more
    // are forwarded to svn as file arguments.
    let mut files: &[String] = &args.files;
    if args.files.len() == 1 {
        repository.set_base_path(args.files[0].clone());
        files = &[];
    }

    let (old_url, new_url) = revision_range_urls(&repository, range)?;

    let mut svn_args: Vec<String> = vec![
        format!("--diff-cmd={}", config.diff_cmd),
        old_url,
        new_url,
    ];
    svn_args.extend(files.iter().cloned());

    let text = client.diff(&svn_args)?;
    Ok((text, repository, true))
}

/// Diff the working copy, gating on scheduled copy history first.
fn run_working_copy_diff(
    client: &SvnClient,
    config: &Config,
    args: &DiffArgs,
) -> Result<(String, RepositoryInfo, bool)> {
    let repository = RepositoryInfo::detect(client, None)?;

    // `svn diff` flattens copied-with-history files into bare adds unless
    // told otherwise; make the user choose rather than silently losing
    // the history.
    let show_copies_as_adds = args.show_copies_as_adds.or(config.show_copies_as_adds);
    if show_copies_as_adds.is_none() && client.has_scheduled_history()? {
        return Err(SvnDiffError::UserError(
            "one or more files in the changeset has history scheduled with commit; \
             run again with --show-copies-as-adds true|false"
                .to_string(),
        ));
    }

    let mut svn_args: Vec<String> = vec![format!("--diff-cmd={}", config.diff_cmd)];
    if show_copies_as_adds == Some(true) {
        svn_args.push("--show-copies-as-adds".to_string());
    }
    if let Some(range) = &args.revision_range {
        svn_args.push("-r".to_string());
        svn_args.push(range.clone());
    }
    if let Some(changelist) = &args.changelist {
        svn_args.push("--changelist".to_string());
        svn_args.push(changelist.clone());
    }
    svn_args.extend(args.files.iter().cloned());

    let text = client.diff(&svn_args)?;
    Ok((text, repository, false))
}

/// Build the old/new URL pair for a URL-to-URL diff.
///
/// A bare revision diffs against HEAD. When the old revision is 0 the
/// base path did not exist yet, so the old URL falls back to the
/// repository root: diffing `base@0` would make svn error out instead of
/// reporting every file under the base path as new.
fn revision_range_urls(repository: &RepositoryInfo, range: &str) -> Result<(String, String)> {
    let mut parts = range.splitn(2, ':');
    let old_rev = parts.next().unwrap_or("");
    let new_rev = parts.next().unwrap_or("HEAD");

    if old_rev.is_empty() || new_rev.is_empty() {
        return Err(SvnDiffError::UserError(format!(
            "invalid revision range '{}': expected REV or REV:REV",
            range
        )));
    }

    let url = format!("{}{}", repository.path, repository.base_path);
    let new_url = format!("{}@{}", url, new_rev);

    let old_base = if old_rev == "0" {
        repository.path.clone()
    } else {
        url
    };
    let old_url = format!("{}@{}", old_base, old_rev);

    Ok((old_url, new_url))
}

fn write_output(args: &DiffArgs, diff_text: &str) -> Result<()> {
    match &args.output {
        Some(path) => std::fs::write(path, diff_text).map_err(|e| {
            SvnDiffError::UserError(format!(
                "failed to write diff to '{}': {}",
                path.display(),
                e
            ))
        }),
        None => {
            print!("{}", diff_text);
            Ok(())
        }
    }
}
