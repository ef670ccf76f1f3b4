//! Reviews command implementation

use crate::config::Config;
use crate::github::GitHubClient;
use crate::reviews;
use anyhow::Result;

/// Print outstanding review-request counts per reviewer
pub fn run_reviews() -> Result<()> {
    let config = Config::load()?;
    let settings = config.github()?;
    let client = GitHubClient::new(&settings.repository, &settings.token);

    let pull_requests = client.list_open_pull_requests()?;
    let counts = reviews::outstanding_review_counts(&pull_requests);

    if counts.is_empty() {
        println!("No outstanding review requests.");
        return Ok(());
    }

    for (login, count) in counts {
        println!("{login:<24} {count}");
    }

    Ok(())
}
