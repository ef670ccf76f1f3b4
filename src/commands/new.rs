//! New command implementation
//!
//! Creates a GitHub issue assigned to the current user and immediately
//! starts a branch for it.

use crate::commands::start;
use crate::config::Config;
use crate::git::SystemGit;
use crate::github::{GitHubClient, NewIssue};
use anyhow::Result;

/// Create an issue and start work on it
pub fn run_new(title: String) -> Result<()> {
    let config = Config::load()?;
    let settings = config.github()?;
    let client = GitHubClient::new(&settings.repository, &settings.token);

    let user = client.current_user()?;
    let issue = client.create_issue(&NewIssue {
        title,
        body: None,
        assignees: vec![user.login],
        labels: vec![],
    })?;
    println!("Issue #{} created: {}", issue.number, issue.html_url);

    start::start_branch(&client, &SystemGit::default(), &settings.trunk, issue.number)
}
