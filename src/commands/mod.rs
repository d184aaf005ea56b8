//! Command implementations
//!
//! - `filesystem`: UNIX-like commands over the working file system (mkdir, create, edit, rm, mv, cp)
//! - `porcelain`: Version control commands (add, commit, checkout, reset, status, log, branch)
//!
//! Every command takes the sandbox by reference and either returns the next
//! sandbox or an error, never a half-applied state.

pub mod filesystem;
pub mod porcelain;
