//! Index entry representation
//!
//! An entry records which blob a staged file resolves to. The path is the key
//! the entry is filed under in the index, not part of the entry itself.

use crate::artifacts::core::FilePath;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::sorted_array::SortedArrayItem;
use derive_new::new;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
pub struct IndexEntry {
    /// Blob holding the staged content
    pub oid: ObjectId,
}

/// A staged file with its full path
pub type IndexItem = SortedArrayItem<FilePath, IndexEntry>;

/// Total order of index paths
pub fn compare_paths(a: &FilePath, b: &FilePath) -> Ordering {
    a.cmp(b)
}
