//! Error taxonomy for workflow commands
//!
//! Every fatal condition a command can hit maps to one of these variants.
//! A missing deploy note is deliberately *not* here: it is a valid outcome
//! rendered as placeholder text, never an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Missing configuration key `{0}`. Add it to .ghflow.toml")]
    ConfigMissing(String),

    #[error(
        "Upstream branch is not set. Push first, e.g. `git push -u origin <branch>`"
    )]
    UpstreamNotSet,

    #[error("Unable to parse an issue number from branch `{0}`. Are you on a workflow branch?")]
    UnparsableBranch(String),

    #[error("Issue title `{0}` produces an empty branch slug")]
    InvalidTitle(String),

    #[error("API request failed: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Git operation failed: {0}")]
    Git(String),

    #[error("No merged branches found. Nothing to clean up")]
    NothingToClean,
}

impl WorkflowError {
    /// Whether this error is a not-found response from an external API.
    ///
    /// Used by the commit-range resolver to pick its degraded fallback path.
    pub fn is_not_found(&self) -> bool {
        matches!(self, WorkflowError::Api { status: 404, .. })
    }
}

/// Whether an error chain bottoms out in an API not-found response
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<WorkflowError>()
        .is_some_and(WorkflowError::is_not_found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message() {
        let err = WorkflowError::Api {
            status: 422,
            message: "Validation Failed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API request failed: HTTP 422: Validation Failed"
        );
    }

    #[test]
    fn test_is_not_found() {
        let not_found = WorkflowError::Api {
            status: 404,
            message: "Not Found".to_string(),
        };
        let forbidden = WorkflowError::Api {
            status: 403,
            message: "Forbidden".to_string(),
        };

        assert!(not_found.is_not_found());
        assert!(!forbidden.is_not_found());
        assert!(!WorkflowError::UpstreamNotSet.is_not_found());
    }
}
