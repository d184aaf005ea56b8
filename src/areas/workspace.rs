//! Simulated working file system
//!
//! A path tree of files (`FileBlob` leaves) and directories. The helpers here
//! are the single-node primitives the file system commands are built from;
//! each returns a new workspace and leaves the receiver untouched.

use crate::artifacts::core::path_string;
use crate::artifacts::objects::blob::FileBlob;
use crate::artifacts::tree::{PathTree, TreeNode};
use crate::errors::{Error, Result};

pub type FileTree = PathTree<FileBlob, String>;
pub type FileNode = TreeNode<FileBlob, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    tree: FileTree,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tree(tree: FileTree) -> Self {
        Workspace { tree }
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn get(&self, path: &[String]) -> Option<FileNode> {
        self.tree.get(path)
    }

    pub fn is_dir(&self, path: &[String]) -> bool {
        matches!(self.tree.get(path), Some(TreeNode::Internal(_)))
    }

    pub fn mkdir(&self, path: &[String]) -> Result<Self> {
        Ok(Self::from_tree(self.tree.insert(path, TreeNode::empty_dir())?))
    }

    /// Create a file with fresh content
    pub fn create_file(&self, path: &[String]) -> Result<Self> {
        Ok(Self::from_tree(
            self.tree.insert(path, TreeNode::Leaf(FileBlob::generate()))?,
        ))
    }

    /// Write a new version of the file at `path`
    pub fn edit_file(&self, path: &[String]) -> Result<Self> {
        let file = match self.tree.get(path) {
            Some(TreeNode::Leaf(file)) => file,
            Some(TreeNode::Internal(_)) => return Err(Error::NotAFile(path_string(path))),
            None => return Err(Error::PathNotFound(path_string(path))),
        };
        Ok(Self::from_tree(self.tree.update_leaf(path, file.bump())?))
    }

    /// Remove a file, or a whole directory when `recursive` is set
    pub fn remove(&self, path: &[String], recursive: bool) -> Result<Self> {
        match self.tree.get(path) {
            None => Err(Error::PathNotFound(path_string(path))),
            Some(TreeNode::Internal(_)) if !recursive => Err(Error::InvalidArgument(format!(
                "'{}': is a directory",
                path_string(path)
            ))),
            Some(_) => Ok(Self::from_tree(self.tree.remove(path)?)),
        }
    }

    /// Move or copy the node at `src` to exactly `dest`
    pub fn relocate(&self, src: &[String], dest: &[String], keep_src: bool) -> Result<Self> {
        Ok(Self::from_tree(self.tree.move_node(src, dest, keep_src)?))
    }
}
