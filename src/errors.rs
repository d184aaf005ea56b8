//! Crate-wide error type
//!
//! Failures come in two flavours:
//!
//! - **Recoverable**: bad arguments, missing paths or objects, an index that does not
//!   describe a valid tree. The operation that reports them leaves every piece of state
//!   exactly as it found it.
//! - **Fatal** (`Corrupted`): the object graph or the ref namespace is already broken
//!   (a tree pointing at a commit, HEAD pointing at a ref namespace, a hash collision).
//!   Callers should stop using the sandbox once one of these shows up.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("'{0}': no such file or directory")]
    PathNotFound(String),

    #[error("'{0}': already exists")]
    AlreadyExists(String),

    #[error("'{0}': not a directory")]
    NotADirectory(String),

    #[error("'{0}': not a file")]
    NotAFile(String),

    #[error("an item with the same key already exists")]
    DuplicateKey,

    #[error("no item exists for the given key")]
    MissingKey,

    #[error("'{oid}': expected a {expected} object, found {found}")]
    InvalidObject {
        oid: ObjectId,
        expected: ObjectType,
        found: String,
    },

    #[error("invalid index tree: {0}")]
    InvalidIndexTree(String),

    #[error("sub-index does not fit into section '{0}'")]
    SectionMismatch(String),

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("repository state is corrupted: {0}")]
    Corrupted(String),
}

impl Error {
    /// Whether the error signals a broken invariant rather than a rejected request
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Corrupted(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
