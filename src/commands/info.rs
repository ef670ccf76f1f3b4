//! Info command implementation

use crate::branch;
use crate::config::Config;
use crate::git::{GitOps, SystemGit};
use crate::github::GitHubClient;
use anyhow::Result;

/// Print the description of the issue the current branch belongs to
pub fn run_info() -> Result<()> {
    let config = Config::load()?;
    let settings = config.github()?;
    let client = GitHubClient::new(&settings.repository, &settings.token);

    let head = SystemGit::default().current_branch()?;
    let number = branch::parse_issue_number(&head)?;

    let issue = client.get_issue(number)?;
    println!("#{} {}", issue.number, issue.title);
    println!();
    println!("{}", issue.body.as_deref().unwrap_or("(no description)"));

    Ok(())
}
