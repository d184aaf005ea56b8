//! A Git sandbox held entirely in memory
//!
//! A [`Sandbox`] pairs a simulated working file system with a repository: a
//! content-addressable object store, a staging index, a branch namespace and
//! HEAD. Files carry no real bytes, only a content token and a version number,
//! which is all the version control layer needs to tell contents apart.
//!
//! Every piece of state is a persistent value. Commands borrow the current
//! sandbox and return a [`Transition`] with the next one, sharing every
//! subtree they did not touch.
//!
//! ```no_run
//! use gitsim::{CommitOptions, Sandbox};
//!
//! # fn main() -> gitsim::Result<()> {
//! let sandbox = Sandbox::default();
//! let sandbox = sandbox.create(&["notes".to_string()])?.sandbox;
//! let sandbox = sandbox.add(&["notes".to_string()])?.sandbox;
//! let transition = sandbox.commit(&CommitOptions::new("first".to_string()))?;
//! println!("{}", transition.message);
//! # Ok(())
//! # }
//! ```

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod errors;

pub use areas::repository::{Repository, Sandbox, Transition};
pub use commands::porcelain::branch::{BranchInfo, BranchOptions};
pub use commands::porcelain::commit::CommitOptions;
pub use commands::porcelain::log::LogEntry;
pub use commands::porcelain::reset::{ResetMode, ResetOptions};
pub use config::SandboxConfig;
pub use errors::{Error, Result};
