//! Start command implementation
//!
//! Creates the workflow branch for an issue: `{number}_{slug}` cut from a
//! freshly rebased trunk, carrying any uncommitted changes along via stash.

use crate::branch;
use crate::config::Config;
use crate::git::{GitOps, SystemGit};
use crate::github::GitHubClient;
use crate::http::HttpClient;
use anyhow::Result;

/// Start work on an issue
pub fn run_start(issue: u64) -> Result<()> {
    let config = Config::load()?;
    let settings = config.github()?;
    let client = GitHubClient::new(&settings.repository, &settings.token);

    start_branch(&client, &SystemGit::default(), &settings.trunk, issue)
}

/// The start flow, separated from config/client construction for testing
pub fn start_branch<H: HttpClient>(
    client: &GitHubClient<H>,
    git: &dyn GitOps,
    trunk: &str,
    issue_number: u64,
) -> Result<()> {
    let issue = client.get_issue(issue_number)?;
    let name = branch::branch_name(issue.number, &issue.title)?;

    let stashed = git.is_dirty()?;
    if stashed {
        println!("Stashing local changes");
        git.stash()?;
    }

    println!("Checking out {trunk}");
    git.checkout(trunk)?;

    println!("Fetching changes and rebasing {trunk}");
    git.pull_rebase()?;

    git.create_branch(&name)?;
    println!("Switched to new branch {name}");

    if stashed {
        println!("Restoring stashed changes");
        git.stash_pop()?;
    }

    Ok(())
}
