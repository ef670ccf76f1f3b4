//! Merge-status partitioning for branch cleanup
//!
//! Classifies local workflow branches by whether their pull request has been
//! merged. Branches that don't follow the `{number}_{slug}` convention are
//! not part of the workflow and are ignored outright.

use crate::branch;
use anyhow::Result;

/// Local branches partitioned by merge status
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergePartition {
    /// Branches whose PR is merged; deletion candidates
    pub merged: Vec<String>,

    /// Branches whose PR is not merged (or has no PR)
    pub unmerged: Vec<String>,
}

/// Partition local branches by the merge status of their pull request.
///
/// `is_merged` is called once per workflow branch with the parsed issue
/// number, in input order; a lookup failure aborts the partition. Callers
/// decide what to do with the result — nothing is deleted here.
pub fn partition_by_merge_status(
    branches: &[String],
    mut is_merged: impl FnMut(u64) -> Result<bool>,
) -> Result<MergePartition> {
    let mut partition = MergePartition::default();

    for name in branches.iter().filter(|n| branch::is_workflow_branch(n.as_str())) {
        let number = branch::parse_issue_number(name)?;

        if is_merged(number)? {
            partition.merged.push(name.clone());
        } else {
            partition.unmerged.push(name.clone());
        }
    }

    Ok(partition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::collections::HashMap;

    fn branches(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_partition_ignores_non_workflow_branches() {
        let lookup: HashMap<u64, bool> = [(101, true), (202, false)].into();

        let partition = partition_by_merge_status(&branches(&["101_a", "202_b", "notes"]), |n| {
            Ok(lookup[&n])
        })
        .unwrap();

        assert_eq!(partition.merged, vec!["101_a".to_string()]);
        assert_eq!(partition.unmerged, vec!["202_b".to_string()]);
    }

    #[test]
    fn test_partition_preserves_input_order() {
        let partition = partition_by_merge_status(
            &branches(&["300_c", "100_a", "200_b"]),
            |_| Ok(true),
        )
        .unwrap();

        assert_eq!(
            partition.merged,
            vec!["300_c".to_string(), "100_a".to_string(), "200_b".to_string()]
        );
    }

    #[test]
    fn test_lookup_not_called_for_ignored_branches() {
        let mut looked_up = Vec::new();

        partition_by_merge_status(&branches(&["main", "trunk", "404_only"]), |n| {
            looked_up.push(n);
            Ok(false)
        })
        .unwrap();

        assert_eq!(looked_up, vec![404]);
    }

    #[test]
    fn test_lookup_failure_aborts() {
        let result = partition_by_merge_status(&branches(&["101_a"]), |_| Err(anyhow!("boom")));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_input() {
        let partition = partition_by_merge_status(&[], |_| Ok(true)).unwrap();
        assert_eq!(partition, MergePartition::default());
    }
}
