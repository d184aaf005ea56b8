//! Staging index
//!
//! The index is the flat, path-sorted list of files the next commit will
//! contain, each mapped to the blob holding its staged content. It is built from
//! the working file system by `add` and from a committed tree by `checkout` and
//! `reset`, and turned back into a tree shape by `commit`.
//!
//! ## Sections
//!
//! Every path owns a contiguous section of the index: the entries at or below
//! it. `add` works by replacing the section of each argument with a fresh
//! sub-index built from the working file system.
//!
//! ```text
//! dir1/dir2/file3 ┐
//! dir1/file1      ├ section of dir1
//! dir1/file2      ┘
//! file4
//! ```

use crate::areas::database::{Database, describe};
use crate::artifacts::core::{FilePath, is_prefix, path_string};
use crate::artifacts::index::index_entry::{IndexEntry, IndexItem, compare_paths};
use crate::artifacts::index::index_tree::{IndexTree, create_index_tree};
use crate::artifacts::objects::blob::{FileBlob, GitBlob};
use crate::artifacts::objects::object::{GitObject, Object};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::GitTree;
use crate::artifacts::sorted_array::{SortedArray, SortedArrayItem};
use crate::artifacts::tree::{PathTree, TreeNode};
use crate::errors::{Error, Result};
use std::cmp::Ordering;
use std::ops::Range;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    entries: SortedArray<FilePath, IndexEntry>,
}

impl Default for Index {
    fn default() -> Self {
        Index {
            entries: SortedArray::new(compare_paths),
        }
    }
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from unordered items, failing on duplicate paths
    pub fn from_items(items: Vec<IndexItem>) -> Result<Self> {
        if items.iter().any(|item| item.key.is_empty()) {
            return Err(empty_path_error());
        }

        Ok(Index {
            entries: SortedArray::from_items(compare_paths, items)?,
        })
    }

    /// Stage every file of `tree`, placing it under `base_path`
    ///
    /// A blob is written for every file; the returned store holds them.
    pub fn from_file_tree(
        tree: &PathTree<FileBlob, String>,
        database: &Database,
        base_path: &[String],
    ) -> Result<(Self, Database)> {
        let mut database = database.clone();
        let mut items = Vec::new();

        for leaf in tree.to_leaf_array(|a, b| a.cmp(b), base_path) {
            let oid = database.store(GitBlob::new(leaf.value))?;
            items.push(SortedArrayItem::new(leaf.path, IndexEntry::new(oid)));
        }

        debug!(base_path = %path_string(base_path), files = items.len(), "indexed file tree");
        Ok((Self::from_items(items)?, database))
    }

    /// Stage a single working file system node found at `path`
    pub fn from_file_node(
        node: &TreeNode<FileBlob, String>,
        database: &Database,
        path: &[String],
    ) -> Result<(Self, Database)> {
        match node {
            TreeNode::Leaf(file) => {
                if path.is_empty() {
                    return Err(empty_path_error());
                }
                let (database, oid) = database.write(GitBlob::new(file.clone()))?;
                let index = Self::from_items(vec![SortedArrayItem::new(
                    path.to_vec(),
                    IndexEntry::new(oid),
                )])?;
                Ok((index, database))
            }
            TreeNode::Internal(children) => Self::from_file_tree(
                &PathTree::from_children((**children).clone()),
                database,
                path,
            ),
        }
    }

    /// Flatten the committed tree `tree_oid` into an index
    pub fn from_git_tree(tree_oid: &ObjectId, database: &Database) -> Result<Self> {
        let tree = database
            .read_tree(tree_oid)
            .ok_or_else(|| Error::InvalidObject {
                oid: tree_oid.clone(),
                expected: ObjectType::Tree,
                found: describe(database.read(tree_oid)),
            })?;

        let mut items = Vec::new();
        collect_tree_items(tree, database, &mut Vec::new(), &mut items)?;
        Self::from_items(items)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Staged files in path order
    pub fn entries(&self) -> impl Iterator<Item = &IndexItem> {
        self.entries.iter()
    }

    pub fn items(&self) -> &[IndexItem] {
        self.entries.items()
    }

    pub fn get(&self, path: &[String]) -> Result<Option<&IndexEntry>> {
        if path.is_empty() {
            return Err(empty_path_error());
        }
        Ok(self.entries.get(&path.to_vec()).item.map(|item| &item.value))
    }

    pub fn upsert(&self, path: &[String], entry: IndexEntry) -> Result<Self> {
        if path.is_empty() {
            return Err(empty_path_error());
        }
        Ok(Index {
            entries: self
                .entries
                .insert(SortedArrayItem::new(path.to_vec(), entry), true)?,
        })
    }

    pub fn remove(&self, path: &[String]) -> Result<Self> {
        if path.is_empty() {
            return Err(empty_path_error());
        }
        Ok(Index {
            entries: self.entries.remove(&path.to_vec())?,
        })
    }

    /// Index span of the entries at or below `path`
    pub fn path_section(&self, path: &[String]) -> Range<usize> {
        self.entries.find_range(|entry_path: &FilePath| {
            if is_prefix(entry_path, path) {
                Ordering::Equal
            } else {
                entry_path.as_slice().cmp(path)
            }
        })
    }

    /// Entries at or below `path`
    pub fn section(&self, path: &[String]) -> &[IndexItem] {
        &self.entries.items()[self.path_section(path)]
    }

    /// Replace the section of `path` with the entries of `sub_index`
    ///
    /// The replacement must fit between the entries surrounding the section:
    /// the one before must sort strictly before the first new entry and the one
    /// after strictly after the last new entry.
    pub fn overwrite_section(&self, path: &[String], sub_index: &Index) -> Result<Self> {
        let section = self.path_section(path);
        let items = self.entries.items();
        let replacement = sub_index.entries.items();

        if let (Some(first), Some(last)) = (replacement.first(), replacement.last()) {
            let fits_before = section.start == 0
                || compare_paths(&items[section.start - 1].key, &first.key) == Ordering::Less;
            let fits_after = section.end == items.len()
                || compare_paths(&items[section.end].key, &last.key) == Ordering::Greater;

            if !fits_before || !fits_after {
                return Err(Error::SectionMismatch(path_string(path)));
            }
        }

        debug!(
            path = %path_string(path),
            removed = section.len(),
            added = replacement.len(),
            "overwriting index section"
        );

        Ok(Index {
            entries: self.entries.splice_unchecked(section, replacement),
        })
    }

    /// Rebuild the tree shape the index describes
    pub fn to_tree(&self) -> Result<IndexTree> {
        create_index_tree(self.entries.items())
    }
}

fn empty_path_error() -> Error {
    Error::InvalidPath(String::from("the index has no entry for the root"))
}

fn collect_tree_items(
    tree: &GitTree,
    database: &Database,
    path: &mut FilePath,
    items: &mut Vec<IndexItem>,
) -> Result<()> {
    for (name, oid) in tree.items() {
        path.push(name.clone());
        match database.read(oid) {
            Some(GitObject::Blob(blob)) => {
                items.push(SortedArrayItem::new(
                    path.clone(),
                    IndexEntry::new(blob.object_id()),
                ));
            }
            Some(GitObject::Tree(subtree)) => {
                collect_tree_items(subtree, database, path, items)?;
            }
            Some(GitObject::Commit(_)) => {
                return Err(Error::Corrupted(format!(
                    "tree entry '{}' points to commit {oid}",
                    path_string(path)
                )));
            }
            None => {
                return Err(Error::Corrupted(format!(
                    "tree entry '{}' points to missing object {oid}",
                    path_string(path)
                )));
            }
        }
        path.pop();
    }

    Ok(())
}
