//! Cleanup command implementation
//!
//! Deletes local branches whose pull request has been merged. Nothing is
//! deleted without the operator confirming the listed candidates, and
//! finding no merged branch at all is surfaced as a stop condition rather
//! than a quiet success.

use crate::cleanup::{self, MergePartition};
use crate::config::Config;
use crate::errors::{self, WorkflowError};
use crate::git::{GitOps, SystemGit};
use crate::github::GitHubClient;
use crate::http::HttpClient;
use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Delete local branches whose PRs are merged, after confirmation
pub fn run_cleanup() -> Result<()> {
    let config = Config::load()?;
    let settings = config.github()?;
    let client = GitHubClient::new(&settings.repository, &settings.token);
    let git = SystemGit::default();

    cleanup_branches(&client, &git, confirm_deletion)
}

/// The cleanup flow, separated from config/client construction for testing
///
/// `confirm` receives the deletion candidates and returns whether to
/// proceed; the interactive implementation prompts on stdin.
pub fn cleanup_branches<H: HttpClient>(
    client: &GitHubClient<H>,
    git: &dyn GitOps,
    confirm: impl FnOnce(&[String]) -> Result<bool>,
) -> Result<()> {
    // The checked-out branch cannot be deleted, so it is not a candidate.
    let current = git.current_branch()?;
    let branches: Vec<String> = git
        .local_branches()?
        .into_iter()
        .filter(|name| name != &current)
        .collect();

    let partition = partition_by_pr_status(client, &branches)?;

    for name in &partition.unmerged {
        println!("Keeping {name} (not merged)");
    }

    if partition.merged.is_empty() {
        return Err(WorkflowError::NothingToClean.into());
    }

    if !confirm(&partition.merged)? {
        println!("Aborted, no branches deleted.");
        return Ok(());
    }

    for name in &partition.merged {
        git.delete_branch(name)?;
        println!("Deleted {name}");
    }

    Ok(())
}

/// Partition local branches using the PR API as the merge-status source
///
/// A branch whose number has no PR at all cannot be merged and lands in the
/// unmerged bucket.
fn partition_by_pr_status<H: HttpClient>(
    client: &GitHubClient<H>,
    branches: &[String],
) -> Result<MergePartition> {
    cleanup::partition_by_merge_status(branches, |number| {
        match client.get_pull_request(number) {
            Ok(pr) => Ok(pr.merged),
            Err(err) if errors::is_not_found(&err) => Ok(false),
            Err(err) => Err(err),
        }
    })
}

/// Ask the operator to confirm deletion of the listed branches
fn confirm_deletion(candidates: &[String]) -> Result<bool> {
    println!("The following branches are merged and will be deleted:");
    for name in candidates {
        println!("  {name}");
    }
    print!("Delete {} branch(es)? [y/N] ", candidates.len());
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim();

    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}
