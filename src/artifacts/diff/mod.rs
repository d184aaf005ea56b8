//! Tree comparison
//!
//! Used by `status` to derive staged and unstaged changes from the HEAD tree,
//! the index tree and the working tree.

pub mod tree_diff;
