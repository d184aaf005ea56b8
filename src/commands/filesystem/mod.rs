//! Working file system commands
//!
//! Small UNIX-like commands over the simulated file system: `mkdir`, `create`
//! (like `touch`), `edit`, `rm`, `mv` and `cp`. They never touch the
//! repository. Every command applies all of its paths or none of them.

pub mod files;
pub mod relocate;

use crate::areas::repository::{Sandbox, Transition};
use crate::areas::workspace::Workspace;
use crate::artifacts::core::{FilePath, parse_path};
use crate::errors::{Error, Result};

impl Sandbox {
    /// Run `apply` for every path on a local copy of the working file system
    fn for_each_path<F>(&self, paths: &[String], missing_operand: &str, apply: F) -> Result<Transition>
    where
        F: Fn(&Workspace, &FilePath) -> Result<Workspace>,
    {
        if paths.is_empty() {
            return Err(Error::InvalidArgument(String::from(missing_operand)));
        }

        let mut workspace = self.workspace().clone();
        for path in paths.iter().map(|path| parse_path(path)) {
            workspace = apply(&workspace, &path)?;
        }

        Ok(Transition::silent(self.with_workspace(workspace)))
    }
}
