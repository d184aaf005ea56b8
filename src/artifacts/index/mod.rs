//! Staging index building blocks
//!
//! The index is a flat list of `(path, entry)` pairs sorted by path. Only files
//! appear in it; directories exist implicitly as shared path prefixes, which is
//! why no entry's path may be a prefix of another's.
//!
//! ## Path order
//!
//! Paths compare segment by segment, each segment byte-wise, and a path sorts
//! right before every path it is a prefix of. The empty path sorts first.
//!
//! ```text
//! dir1/dir2/file3
//! dir1/file1
//! dir1/file2
//! file4
//! ```

pub mod index_entry;
pub mod index_tree;
