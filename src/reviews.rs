//! Outstanding review-request aggregation
//!
//! Counts how many open pull requests are waiting on each reviewer.

use crate::github::PullRequest;

/// Count outstanding review requests per reviewer login.
///
/// Logins are ordered by first appearance across the input PRs, so the
/// output is reproducible for a given input order rather than depending on
/// map iteration.
pub fn outstanding_review_counts(pull_requests: &[PullRequest]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for pr in pull_requests {
        for reviewer in &pr.requested_reviewers {
            match counts.iter_mut().find(|(login, _)| login == &reviewer.login) {
                Some((_, count)) => *count += 1,
                None => counts.push((reviewer.login.clone(), 1)),
            }
        }
    }

    counts
}
