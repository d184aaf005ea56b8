//! Content-addressable object store
//!
//! Objects are filed under the SHA-1 of their canonical serialization, so the
//! key of every stored object is a pure function of its fields. Writing the same
//! content twice is a no-op that returns the same ID.
//!
//! The map sits behind an `Arc`: a `Database` is cheap to clone, and the first
//! write to a shared store copies it. Public operations return a new store and
//! leave the receiver untouched.

use crate::artifacts::core::FilePath;
use crate::artifacts::objects::blob::{FileBlob, GitBlob};
use crate::artifacts::objects::commit::GitCommit;
use crate::artifacts::objects::object::{GitObject, Object};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::GitTree;
use crate::artifacts::tree::{Children, PathTree, TreeNode};
use crate::errors::{Error, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Database {
    objects: Arc<BTreeMap<ObjectId, GitObject>>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// ID the object would be stored under
    pub fn hash(object: &GitObject) -> ObjectId {
        object.object_id()
    }

    /// Store `object`, returning the new store and the object's ID
    pub fn write(&self, object: impl Into<GitObject>) -> Result<(Self, ObjectId)> {
        let mut database = self.clone();
        let oid = database.store(object)?;
        Ok((database, oid))
    }

    /// Remove the object stored under `oid`
    ///
    /// The flag tells whether anything was removed.
    pub fn delete(&self, oid: &ObjectId) -> (Self, bool) {
        if !self.objects.contains_key(oid) {
            return (self.clone(), false);
        }

        let mut database = self.clone();
        Arc::make_mut(&mut database.objects).remove(oid);
        (database, true)
    }

    pub fn read(&self, oid: &ObjectId) -> Option<&GitObject> {
        self.objects.get(oid)
    }

    pub fn read_blob(&self, oid: &ObjectId) -> Option<&GitBlob> {
        match self.read(oid)? {
            GitObject::Blob(blob) => Some(blob),
            _ => None,
        }
    }

    pub fn read_tree(&self, oid: &ObjectId) -> Option<&GitTree> {
        match self.read(oid)? {
            GitObject::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    pub fn read_commit(&self, oid: &ObjectId) -> Option<&GitCommit> {
        match self.read(oid)? {
            GitObject::Commit(commit) => Some(commit),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Every stored object in ID order
    pub fn entries(&self) -> impl Iterator<Item = (&ObjectId, &GitObject)> {
        self.objects.iter()
    }

    /// IDs of the stored objects starting with `prefix`
    pub fn find_by_prefix(&self, prefix: &str) -> Vec<ObjectId> {
        let prefix = prefix.to_ascii_lowercase();
        self.objects
            .keys()
            .filter(|oid| oid.as_ref().starts_with(&prefix))
            .cloned()
            .collect()
    }

    /// Load a commit named by a caller
    ///
    /// A missing object or one of another type is a rejected request, not corruption.
    pub fn load_commit(&self, oid: &ObjectId) -> Result<&GitCommit> {
        match self.read(oid) {
            Some(GitObject::Commit(commit)) => Ok(commit),
            other => Err(Error::InvalidObject {
                oid: oid.clone(),
                expected: ObjectType::Commit,
                found: describe(other),
            }),
        }
    }

    /// Load the tree a stored commit points to
    ///
    /// Stored commits always point at stored trees, anything else is corruption.
    pub fn load_work_tree(&self, commit: &GitCommit) -> Result<&GitTree> {
        let oid = commit.work_tree();
        match self.read(oid) {
            Some(GitObject::Tree(tree)) => Ok(tree),
            other => Err(Error::Corrupted(format!(
                "work tree {oid} resolves to {}",
                describe(other)
            ))),
        }
    }

    /// Walk the tree graph under `tree` and rebuild the file system it describes
    pub fn materialize_tree(&self, tree: &GitTree) -> Result<PathTree<FileBlob, String>> {
        let children = self.materialize_children(tree, &mut Vec::new())?;
        debug!(files = children.len(), "materialized tree");
        Ok(PathTree::from_children(children))
    }

    fn materialize_children(
        &self,
        tree: &GitTree,
        path: &mut FilePath,
    ) -> Result<Children<FileBlob, String>> {
        let mut children = BTreeMap::new();

        for (name, oid) in tree.items() {
            path.push(name.clone());
            let node = match self.read(oid) {
                Some(GitObject::Blob(blob)) => TreeNode::Leaf(blob.file_data().clone()),
                Some(GitObject::Tree(subtree)) => {
                    TreeNode::Internal(Arc::new(self.materialize_children(subtree, path)?))
                }
                other => {
                    return Err(Error::Corrupted(format!(
                        "tree entry '{}' ({oid}) resolves to {}",
                        path.join("/"),
                        describe(other)
                    )));
                }
            };
            path.pop();

            children.insert(name.clone(), node);
        }

        Ok(children)
    }

    /// In-place write used while building up a new store
    pub(crate) fn store(&mut self, object: impl Into<GitObject>) -> Result<ObjectId> {
        let object = object.into();
        let oid = Self::hash(&object);

        match self.objects.get(&oid) {
            Some(existing) if *existing == object => {}
            Some(_) => {
                return Err(Error::Corrupted(format!(
                    "hash collision on {oid}: stored object differs"
                )));
            }
            None => {
                debug!(%oid, object_type = %object.object_type(), "storing object");
                Arc::make_mut(&mut self.objects).insert(oid.clone(), object);
            }
        }

        Ok(oid)
    }
}

pub(crate) fn describe(object: Option<&GitObject>) -> String {
    match object {
        Some(object) => format!("a {} object", object.object_type()),
        None => String::from("nothing"),
    }
}
