//! Sandbox state
//!
//! - `database`: Content-addressable store of blobs, trees and commits
//! - `index`: Staging index between the working file system and the next commit
//! - `refs`: Branch namespace and HEAD
//! - `repository`: Repository aggregate and the sandbox holding it
//! - `workspace`: Simulated working file system

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
