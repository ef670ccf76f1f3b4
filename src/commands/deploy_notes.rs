//! Deploy-notes command implementation

use crate::config::Config;
use crate::deploy;
use crate::github::GitHubClient;
use anyhow::Result;

/// Print the deploy-notes report for a commit range
pub fn run_deploy_notes(from: String, to: String) -> Result<()> {
    let config = Config::load()?;
    let settings = config.github()?;
    let client = GitHubClient::new(&settings.repository, &settings.token);

    let records = deploy::resolve_commit_range(&client, &from, &to)?;
    if records.is_empty() {
        println!("No work items referenced between {from} and {to}.");
        return Ok(());
    }

    println!("{}", deploy::deploy_notes_report(&records));
    Ok(())
}
