//! Version-control operations
//!
//! The workflow core never shells out directly; everything it needs from git
//! sits behind the [`GitOps`] trait so commands can be tested against a mock.
//! [`SystemGit`] is the real implementation, one subprocess per operation.

use crate::errors::WorkflowError;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Command;

#[cfg(test)]
use mockall::automock;

/// The narrow set of git operations the workflow uses
#[cfg_attr(test, automock)]
pub trait GitOps {
    /// Name of the currently checked-out branch
    fn current_branch(&self) -> Result<String>;

    /// Names of all local branches
    fn local_branches(&self) -> Result<Vec<String>>;

    /// Whether the working tree has uncommitted changes to tracked files
    fn is_dirty(&self) -> Result<bool>;

    /// Whether the current branch has an upstream tracking branch
    fn has_upstream(&self) -> Result<bool>;

    /// Check out an existing branch
    fn checkout(&self, branch: &str) -> Result<()>;

    /// Create and check out a branch from the current HEAD
    fn create_branch(&self, name: &str) -> Result<()>;

    /// Stash local changes
    fn stash(&self) -> Result<()>;

    /// Pop the most recent stash
    fn stash_pop(&self) -> Result<()>;

    /// Fetch and rebase the current branch onto its upstream
    fn pull_rebase(&self) -> Result<()>;

    /// Push a branch to origin and set its upstream
    fn push_set_upstream(&self, branch: &str) -> Result<()>;

    /// Delete a local branch
    fn delete_branch(&self, name: &str) -> Result<()>;
}

/// Git implementation backed by the `git` binary
pub struct SystemGit {
    repo_path: PathBuf,
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new(".")
    }
}

impl SystemGit {
    /// Create a git adapter for the given repository path
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    /// Run a git command and return its stdout
    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .context("Failed to execute git command")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(WorkflowError::Git(format!(
                "`git {}`: {}",
                args.join(" "),
                stderr.trim()
            ))
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Run a git command where the exit status is the answer
    fn run_status(&self, args: &[&str]) -> Result<bool> {
        let status = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .context("Failed to execute git command")?
            .status;

        Ok(status.success())
    }
}

impl GitOps for SystemGit {
    fn current_branch(&self) -> Result<String> {
        Ok(self
            .run(&["rev-parse", "--abbrev-ref", "HEAD"])?
            .trim()
            .to_string())
    }

    fn local_branches(&self) -> Result<Vec<String>> {
        let output = self.run(&["for-each-ref", "--format=%(refname:short)", "refs/heads"])?;
        Ok(output.lines().map(|s| s.trim().to_string()).collect())
    }

    fn is_dirty(&self) -> Result<bool> {
        // Exit status 1 means tracked files differ from HEAD.
        Ok(!self.run_status(&["diff", "--quiet", "HEAD"])?)
    }

    fn has_upstream(&self) -> Result<bool> {
        self.run_status(&["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"])
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.run(&["checkout", branch]).map(|_| ())
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        self.run(&["checkout", "-b", name]).map(|_| ())
    }

    fn stash(&self) -> Result<()> {
        self.run(&["stash", "--quiet"]).map(|_| ())
    }

    fn stash_pop(&self) -> Result<()> {
        self.run(&["stash", "pop", "--quiet"]).map(|_| ())
    }

    fn pull_rebase(&self) -> Result<()> {
        self.run(&["pull", "--rebase"]).map(|_| ())
    }

    fn push_set_upstream(&self, branch: &str) -> Result<()> {
        self.run(&["push", "-u", "origin", branch]).map(|_| ())
    }

    fn delete_branch(&self, name: &str) -> Result<()> {
        self.run(&["branch", "-D", name]).map(|_| ())
    }
}
