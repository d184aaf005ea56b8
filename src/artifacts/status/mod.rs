//! Status of the working file system against the index and HEAD
//!
//! - `file_change`: per-path change codes and their rendering
//! - `status_info`: the full report produced by the `status` command

pub mod file_change;
pub mod status_info;
