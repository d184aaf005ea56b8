use crate::artifacts::objects::blob::GitBlob;
use crate::artifacts::objects::commit::GitCommit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::GitTree;
use bytes::Bytes;

/// Canonical serialization an object is hashed over
pub trait Packable {
    fn serialize(&self) -> Bytes;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    fn object_id(&self) -> ObjectId {
        ObjectId::digest(&self.serialize())
    }
}

/// Any object kept in the object store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitObject {
    Blob(GitBlob),
    Tree(GitTree),
    Commit(GitCommit),
}

impl GitObject {
    fn inner(&self) -> &dyn Object {
        match self {
            GitObject::Blob(blob) => blob,
            GitObject::Tree(tree) => tree,
            GitObject::Commit(commit) => commit,
        }
    }
}

impl Packable for GitObject {
    fn serialize(&self) -> Bytes {
        self.inner().serialize()
    }
}

impl Object for GitObject {
    fn object_type(&self) -> ObjectType {
        self.inner().object_type()
    }

    fn display(&self) -> String {
        self.inner().display()
    }
}

impl From<GitBlob> for GitObject {
    fn from(blob: GitBlob) -> Self {
        GitObject::Blob(blob)
    }
}

impl From<GitTree> for GitObject {
    fn from(tree: GitTree) -> Self {
        GitObject::Tree(tree)
    }
}

impl From<GitCommit> for GitObject {
    fn from(commit: GitCommit) -> Self {
        GitObject::Commit(commit)
    }
}
