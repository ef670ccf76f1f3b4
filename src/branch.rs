//! Branch naming and parsing
//!
//! Workflow branches follow the `{issue_number}_{slug}` convention: the leading
//! underscore-delimited token is the issue number, and the slug is the
//! lower-cased issue title with non-alphanumeric runs collapsed to single
//! underscores. Both directions live here so they cannot drift apart.

use crate::errors::WorkflowError;

/// Normalize a title into a branch-safe slug.
///
/// Lower-cases, replaces every character outside `[a-zA-Z0-9]` with `_`,
/// collapses consecutive underscores and strips them from both ends. The
/// transformation is idempotent.
pub fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.trim().chars() {
        if c.is_ascii_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

/// Build the branch name for an issue: `"{number}_{slug}"`.
///
/// Fails with [`WorkflowError::InvalidTitle`] when the title contains no
/// alphanumeric characters at all.
pub fn branch_name(number: u64, title: &str) -> Result<String, WorkflowError> {
    let slug = slug(title);
    if slug.is_empty() {
        return Err(WorkflowError::InvalidTitle(title.to_string()));
    }
    Ok(format!("{number}_{slug}"))
}

/// Parse the issue number out of a branch name.
///
/// The first `_`-delimited token must be a positive integer; anything else is
/// [`WorkflowError::UnparsableBranch`]. Zero is rejected so a malformed branch
/// can never masquerade as a real issue.
pub fn parse_issue_number(branch: &str) -> Result<u64, WorkflowError> {
    let token = branch
        .split('_')
        .next()
        .ok_or_else(|| WorkflowError::UnparsableBranch(branch.to_string()))?;

    match token.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(WorkflowError::UnparsableBranch(branch.to_string())),
    }
}

/// Whether a local branch follows the `{number}_{slug}` convention.
///
/// Branches that don't (e.g. `main`, `notes`) are simply not part of the
/// workflow and get ignored by cleanup.
pub fn is_workflow_branch(branch: &str) -> bool {
    parse_issue_number(branch).is_ok()
}
