//! Issue-to-pull-request conversion commands
//!
//! `create-pr` converts the current branch's issue into a PR; `push-and-pr`
//! pushes the branch upstream first. Both derive the issue number from the
//! branch name, so they refuse to run on non-workflow branches.

use crate::branch;
use crate::config::Config;
use crate::errors::WorkflowError;
use crate::git::{GitOps, SystemGit};
use crate::github::{GitHubClient, PullRequest};
use crate::http::HttpClient;
use anyhow::Result;

/// Convert the current branch's issue into a pull request
pub fn run_create_pr(base: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let settings = config.github()?;
    let client = GitHubClient::new(&settings.repository, &settings.token);
    let git = SystemGit::default();

    let base = base.unwrap_or(settings.trunk);
    convert_issue_to_pr(&client, &git, &base)?;
    Ok(())
}

/// Push the current branch with upstream set, then convert its issue to a PR
pub fn run_push_and_pr(base: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let settings = config.github()?;
    let client = GitHubClient::new(&settings.repository, &settings.token);
    let git = SystemGit::default();

    let head = git.current_branch()?;
    println!("Pushing {head} to origin");
    git.push_set_upstream(&head)?;

    let base = base.unwrap_or(settings.trunk);
    convert_issue_to_pr(&client, &git, &base)?;
    Ok(())
}

/// The conversion flow, separated from config/client construction for testing
pub fn convert_issue_to_pr<H: HttpClient>(
    client: &GitHubClient<H>,
    git: &dyn GitOps,
    base: &str,
) -> Result<PullRequest> {
    if !git.has_upstream()? {
        return Err(WorkflowError::UpstreamNotSet.into());
    }

    let head = git.current_branch()?;
    let issue_number = branch::parse_issue_number(&head)?;

    let pr = client.create_pull_request(&head, base, issue_number)?;
    println!("Issue #{issue_number} converted to pull request: {}", pr.html_url);

    Ok(pr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockGitOps;
    use crate::http::{Headers, HttpResponse, MockHttpClient};

    fn pr_client() -> GitHubClient<MockHttpClient> {
        let mut mock = MockHttpClient::new();
        mock.expect_post()
            .withf(|url: &str, _: &Headers, body: &String| {
                url.ends_with("/pulls")
                    && body.contains(r#""issue":1234"#)
                    && body.contains("1234_fix_the_bug")
                    && body.contains(r#""base":"main""#)
            })
            .returning(|_, _, _| {
                Ok(HttpResponse {
                    status: 201,
                    body: serde_json::json!({
                        "number": 1234,
                        "title": "Fix the bug",
                        "body": null,
                        "html_url": "https://github.com/test/repo/pull/1234",
                        "head": {"ref": "1234_fix_the_bug"},
                        "base": {"ref": "main"}
                    })
                    .to_string(),
                })
            });
        GitHubClient::with_http_client("test/repo", "token", mock)
    }

    #[test]
    fn test_convert_current_branch() {
        let mut git = MockGitOps::new();
        git.expect_has_upstream().returning(|| Ok(true));
        git.expect_current_branch()
            .returning(|| Ok("1234_fix_the_bug".to_string()));

        let pr = convert_issue_to_pr(&pr_client(), &git, "main").unwrap();
        assert_eq!(pr.number, 1234);
    }

    #[test]
    fn test_requires_upstream() {
        let mut git = MockGitOps::new();
        git.expect_has_upstream().returning(|| Ok(false));

        let err = convert_issue_to_pr(&pr_client(), &git, "main").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WorkflowError>(),
            Some(WorkflowError::UpstreamNotSet)
        ));
    }

    #[test]
    fn test_rejects_non_workflow_branch() {
        let mut git = MockGitOps::new();
        git.expect_has_upstream().returning(|| Ok(true));
        git.expect_current_branch().returning(|| Ok("main".to_string()));

        let err = convert_issue_to_pr(&pr_client(), &git, "main").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WorkflowError>(),
            Some(WorkflowError::UnparsableBranch(_))
        ));
    }
}
