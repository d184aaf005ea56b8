//! Value types and algorithms
//!
//! - `branch`: Branch names and revision parsing
//! - `core`: Path helpers shared by every tree
//! - `diff`: Structural comparison of path trees
//! - `index`: Index entries and index-to-tree conversion
//! - `objects`: Stored object types (blob, tree, commit) and their hashes
//! - `sorted_array`: Persistent sorted array with binary-search lookups
//! - `status`: Change reports built from tree comparisons
//! - `tree`: Persistent path tree with shared subtrees

pub mod branch;
pub mod core;
pub mod diff;
pub mod index;
pub mod objects;
pub mod sorted_array;
pub mod status;
pub mod tree;
