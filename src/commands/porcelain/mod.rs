//! Version control commands
//!
//! Each command is an `impl Sandbox` block in its own file. Commands that
//! change anything return a [`Transition`](crate::areas::repository::Transition)
//! holding the next sandbox; read-only ones (`status`, `log`, listing branches)
//! return plain values.
//!
//! ## Commands
//!
//! - `add`: Stage paths from the working file system
//! - `commit`: Record the index as a new commit
//! - `checkout`: Restore a commit's files and move HEAD to it
//! - `reset`: Move HEAD, optionally rewriting the index and the working file system
//! - `status`: Compare HEAD, the index and the working file system
//! - `log`: Show commit history
//! - `branch`: Create, list, or delete branches

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod log;
pub mod reset;
pub mod status;
