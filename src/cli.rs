//! CLI argument parsing

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ghflow")]
#[command(author, version, about = "Issue-number branch workflow for GitHub and Trello")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a branch named after an issue and switch to it
    Start {
        /// Issue number to start work on
        #[arg(short, long)]
        issue: u64,
    },
    /// Create an issue assigned to you, then start a branch for it
    New {
        /// Issue title
        #[arg(short = 'm', long)]
        title: String,
    },
    /// Convert the current branch's issue into a pull request
    CreatePr {
        /// Base branch for the pull request (default: configured trunk)
        #[arg(short, long)]
        base: Option<String>,
    },
    /// Push the current branch to origin, then convert its issue into a PR
    PushAndPr {
        /// Base branch for the pull request (default: configured trunk)
        #[arg(short, long)]
        base: Option<String>,
    },
    /// Print the issue description for the current branch
    Info,
    /// Show the latest CI status per context for the current branch
    Status,
    /// Import a Trello card as a GitHub issue
    ImportCard {
        /// Card number on the board
        #[arg(short, long)]
        card: u64,
        /// Which configured board to read from
        #[arg(short, long, default_value = "default")]
        kind: String,
    },
    /// Print deploy notes for the work items referenced in a commit range
    DeployNotes {
        /// Older ref of the range
        #[arg(long)]
        from: String,
        /// Newer ref of the range
        #[arg(long)]
        to: String,
    },
    /// Delete local branches whose pull requests are merged
    Cleanup,
    /// Show outstanding review-request counts per reviewer
    Reviews,
}
