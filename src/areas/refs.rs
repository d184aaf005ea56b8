//! References (branches) and HEAD
//!
//! Refs live in a path tree: leaves hold commit IDs and internal nodes are
//! namespaces, so the branch `feature/login` is the leaf `login` inside the
//! `feature` namespace.
//!
//! HEAD is either:
//! - **Stable**: attached to a ref path; committing moves the ref, not HEAD
//! - **Detached**: pointing straight at a commit; committing moves HEAD itself
//!
//! A stable HEAD may point at a ref that does not exist yet (a branch without
//! commits). Such a HEAD resolves to no commit, and the first commit creates
//! the ref.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::{FilePath, path_string};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::tree::{LeafItem, PathTree, TreeNode};
use crate::errors::{Error, Result};
use tracing::debug;

/// Path of a ref inside the ref namespace
pub type RefPath = FilePath;

/// Ref namespace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Refs {
    tree: PathTree<ObjectId, String>,
}

impl Refs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the commit the ref at `path` points to
    pub fn read_leaf(&self, path: &[String]) -> Result<ObjectId> {
        if path.is_empty() {
            return Err(empty_ref_path());
        }

        match self.tree.get(path) {
            Some(TreeNode::Leaf(oid)) => Ok(oid),
            Some(TreeNode::Internal(_)) => Err(Error::NotAFile(path_string(path))),
            None => Err(Error::PathNotFound(path_string(path))),
        }
    }

    /// Create a ref at `path`
    ///
    /// Missing namespaces along the way are created; an existing node at
    /// `path` is never replaced.
    pub fn create(&self, path: &[String], oid: ObjectId) -> Result<Self> {
        if path.is_empty() {
            return Err(empty_ref_path());
        }

        let mut tree = self.tree.clone();
        for depth in 1..path.len() {
            let namespace = &path[..depth];
            match tree.get(namespace) {
                Some(TreeNode::Internal(_)) => {}
                Some(TreeNode::Leaf(_)) => {
                    return Err(Error::NotADirectory(path_string(namespace)));
                }
                None => tree = tree.insert(namespace, TreeNode::empty_dir())?,
            }
        }

        debug!(path = %path_string(path), %oid, "creating ref");
        Ok(Refs {
            tree: tree.insert(path, TreeNode::Leaf(oid))?,
        })
    }

    /// Point the existing ref at `path` to `oid`
    pub fn update(&self, path: &[String], oid: ObjectId) -> Result<Self> {
        if path.is_empty() {
            return Err(empty_ref_path());
        }

        debug!(path = %path_string(path), %oid, "updating ref");
        Ok(Refs {
            tree: self.tree.update_leaf(path, oid)?,
        })
    }

    /// Delete the ref at `path`
    ///
    /// Namespaces left empty by the deletion are removed as well.
    pub fn delete(&self, path: &[String]) -> Result<Self> {
        self.read_leaf(path)?;

        let mut tree = self.tree.remove(path)?;
        for depth in (1..path.len()).rev() {
            let namespace = &path[..depth];
            match tree.children(namespace) {
                Ok(children) if children.is_empty() => tree = tree.remove(namespace)?,
                _ => break,
            }
        }

        debug!(path = %path_string(path), "deleted ref");
        Ok(Refs { tree })
    }

    /// Entries of the namespace at `path`
    pub fn children(&self, path: &[String]) -> Result<Vec<(String, TreeNode<ObjectId, String>)>> {
        self.tree.children(path)
    }

    /// Every ref with its full path, in name order
    pub fn list(&self) -> Vec<LeafItem<ObjectId, String>> {
        self.tree.to_leaf_array(|a, b| a.cmp(b), &[])
    }

    pub(crate) fn node(&self, path: &[String]) -> Option<TreeNode<ObjectId, String>> {
        self.tree.get(path)
    }
}

fn empty_ref_path() -> Error {
    Error::InvalidPath(String::from("a ref path cannot be empty"))
}

/// HEAD pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    Detached(ObjectId),
    Stable(RefPath),
}

impl Head {
    /// HEAD of a fresh repository, attached to `branch`
    pub fn new(branch: &BranchName) -> Self {
        Head::Stable(branch.ref_path())
    }

    pub fn detach_to(&self, oid: ObjectId) -> Self {
        Head::Detached(oid)
    }

    pub fn attach_to(&self, path: RefPath) -> Self {
        Head::Stable(path)
    }

    pub fn is_detached(&self) -> bool {
        matches!(self, Head::Detached(_))
    }

    /// Name of the branch HEAD is attached to
    pub fn branch(&self) -> Option<String> {
        match self {
            Head::Detached(_) => None,
            Head::Stable(path) => Some(path_string(path)),
        }
    }

    /// Commit HEAD currently designates, `None` on a branch without commits
    pub fn resolve(&self, refs: &Refs) -> Result<Option<ObjectId>> {
        match self {
            Head::Detached(oid) => Ok(Some(oid.clone())),
            Head::Stable(path) => match refs.node(path) {
                Some(TreeNode::Leaf(oid)) => Ok(Some(oid)),
                Some(TreeNode::Internal(_)) => Err(Error::Corrupted(format!(
                    "HEAD points to ref namespace '{}'",
                    path_string(path)
                ))),
                None => Ok(None),
            },
        }
    }

    /// Move whatever HEAD designates to `oid`
    ///
    /// A detached HEAD moves itself; a stable HEAD stays put and its ref moves
    /// instead, being created if the branch had no commits yet.
    pub fn advance(&self, refs: &Refs, oid: ObjectId) -> Result<(Head, Refs)> {
        match self {
            Head::Detached(_) => Ok((self.detach_to(oid), refs.clone())),
            Head::Stable(path) => {
                let refs = match refs.node(path) {
                    Some(TreeNode::Leaf(_)) => refs.update(path, oid)?,
                    Some(TreeNode::Internal(_)) => {
                        return Err(Error::Corrupted(format!(
                            "HEAD points to ref namespace '{}'",
                            path_string(path)
                        )));
                    }
                    None => refs.create(path, oid)?,
                };
                Ok((self.clone(), refs))
            }
        }
    }
}
