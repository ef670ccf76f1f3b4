//! Status command implementation

use crate::config::Config;
use crate::git::{GitOps, SystemGit};
use crate::github::GitHubClient;
use crate::status;
use anyhow::Result;

/// Print the latest CI status per context for the current branch
pub fn run_status() -> Result<()> {
    let config = Config::load()?;
    let settings = config.github()?;
    let client = GitHubClient::new(&settings.repository, &settings.token);

    let head = SystemGit::default().current_branch()?;
    let statuses = client.statuses(&head)?;

    if statuses.is_empty() {
        println!("No statuses yet. Have you pushed your branch?");
        return Ok(());
    }

    for entry in status::latest_per_context(&statuses) {
        println!(
            "{:<30} {:<10} {}",
            entry.context,
            entry.state,
            entry.description.as_deref().unwrap_or("")
        );
    }

    Ok(())
}
