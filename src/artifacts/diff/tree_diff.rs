//! Structural diff between two path trees
//!
//! The comparison walks both trees side by side. Children are matched by name:
//!
//! - only in `other` → `Added`
//! - only in `base` → `Deleted`
//! - leaves on both sides with different values → `Modified`
//! - directories on both sides → recurse
//! - a leaf on one side and a directory on the other → `Deleted` then `Added`
//!   at the same path (there is no "type changed" kind)
//!
//! Subtrees shared between the two trees (same `Arc`) are skipped without being walked.

use crate::artifacts::tree::{Children, PathTree, TreeNode};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
}

impl ChangeKind {
    pub fn as_str(&self) -> &str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single difference between two trees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeChange<N> {
    pub path: Vec<N>,
    pub kind: ChangeKind,
}

/// Compare `other` against `base`, returning changes in path order
pub fn compare_trees<L, N>(base: &PathTree<L, N>, other: &PathTree<L, N>) -> Vec<TreeChange<N>>
where
    L: Clone + PartialEq,
    N: Ord + Clone + Display,
{
    let mut changes = Vec::new();
    compare_children(base.root(), other.root(), &[], &mut changes);
    changes
}

fn compare_children<L, N>(
    base: &Children<L, N>,
    other: &Children<L, N>,
    base_path: &[N],
    changes: &mut Vec<TreeChange<N>>,
) where
    L: PartialEq,
    N: Ord + Clone,
{
    let names = base.keys().chain(other.keys()).collect::<BTreeSet<_>>();

    for name in names {
        let mut path = base_path.to_vec();
        path.push(name.clone());

        match (base.get(name), other.get(name)) {
            (None, None) => {}
            (None, Some(_)) => changes.push(TreeChange {
                path,
                kind: ChangeKind::Added,
            }),
            (Some(_), None) => changes.push(TreeChange {
                path,
                kind: ChangeKind::Deleted,
            }),
            (Some(TreeNode::Leaf(base_leaf)), Some(TreeNode::Leaf(other_leaf))) => {
                if base_leaf != other_leaf {
                    changes.push(TreeChange {
                        path,
                        kind: ChangeKind::Modified,
                    });
                }
            }
            (Some(TreeNode::Internal(base_sub)), Some(TreeNode::Internal(other_sub))) => {
                if !Arc::ptr_eq(base_sub, other_sub) {
                    compare_children(base_sub, other_sub, &path, changes);
                }
            }
            (Some(_), Some(_)) => {
                changes.push(TreeChange {
                    path: path.clone(),
                    kind: ChangeKind::Deleted,
                });
                changes.push(TreeChange {
                    path,
                    kind: ChangeKind::Added,
                });
            }
        }
    }
}
