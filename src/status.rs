//! CI status correlation
//!
//! The statuses endpoint returns every status entry ever posted to a commit,
//! one per push per CI context. Only the most recent entry per context
//! reflects where CI actually stands, so the raw list has to be collapsed
//! before it is worth showing.

use crate::github::CommitStatus;

/// Collapse a status list to the latest entry per CI context.
///
/// Contexts keep their first-appearance order; within a context the entry
/// with the greatest `updated_at` wins, later entries winning ties. The
/// timestamps are ISO 8601 and compare correctly as strings.
pub fn latest_per_context(statuses: &[CommitStatus]) -> Vec<CommitStatus> {
    let mut latest: Vec<CommitStatus> = Vec::new();

    for status in statuses {
        match latest.iter_mut().find(|s| s.context == status.context) {
            Some(existing) => {
                if status.updated_at >= existing.updated_at {
                    *existing = status.clone();
                }
            }
            None => latest.push(status.clone()),
        }
    }

    latest
}
