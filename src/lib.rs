//! ghflow - issue-number branch workflow automation
//!
//! Correlates work items across a local git checkout, GitHub and a Trello
//! board: branches are named `{issue_number}_{slug}`, commits reference work
//! items as `[#NNNN]`, and PR bodies carry `**Deploy Note:**` annotations.
//!
//! # Modules
//!
//! - [`branch`] - branch naming and parsing
//! - [`import`] - card-to-issue field mapping
//! - [`deploy`] - commit-range resolution and deploy-note extraction
//! - [`cleanup`] - merge-status partitioning of local branches
//! - [`reviews`] - outstanding review-request aggregation
//! - [`status`] - latest-per-context CI status correlation
//! - [`github`] / [`trello`] - the two API clients
//! - [`git`] - version-control operations behind a trait
//! - [`commands`] - the CLI-facing command adapters

pub mod branch;
pub mod cleanup;
pub mod cli;
pub mod commands;
pub mod config;
pub mod deploy;
pub mod errors;
pub mod git;
pub mod github;
pub mod http;
pub mod import;
pub mod reviews;
pub mod status;
pub mod trello;

// Re-export commonly used types
pub use config::Config;
pub use errors::WorkflowError;
pub use git::{GitOps, SystemGit};
pub use github::GitHubClient;
pub use trello::TrelloClient;
