use crate::areas::repository::{Sandbox, Transition};
use crate::areas::workspace::{FileNode, Workspace};
use crate::artifacts::core::{FilePath, parse_path, path_string};
use crate::artifacts::tree::TreeNode;
use crate::errors::{Error, Result};
use tracing::debug;

impl Sandbox {
    /// Move sources to a destination, like UNIX `mv`
    ///
    /// With a single source the destination may be a new name or an existing
    /// directory to move into. With several sources it must be a directory.
    pub fn mv(&self, paths: &[String]) -> Result<Transition> {
        let (sources, dest) = match paths {
            [] => return Err(Error::InvalidArgument(String::from("no file paths provided"))),
            [_] => return Err(Error::InvalidArgument(String::from("missing destination path"))),
            [sources @ .., dest] => (sources, parse_path(dest)),
        };

        let workspace = self.relocate_all(sources, &dest, false, true)?;
        Ok(Transition::silent(self.with_workspace(workspace)))
    }

    /// Copy sources to a destination, like UNIX `cp`
    ///
    /// Directories are only copied when `recursive` is set.
    pub fn cp(&self, paths: &[String], recursive: bool) -> Result<Transition> {
        let (sources, dest) = match paths.split_last() {
            Some((dest, sources)) if !sources.is_empty() => (sources, parse_path(dest)),
            _ => return Err(Error::InvalidArgument(String::from("insufficient arguments"))),
        };

        let workspace = self.relocate_all(sources, &dest, true, recursive)?;
        Ok(Transition::silent(self.with_workspace(workspace)))
    }

    fn relocate_all(
        &self,
        sources: &[String],
        dest: &[String],
        keep_src: bool,
        allow_dirs: bool,
    ) -> Result<Workspace> {
        if sources.len() > 1 && !self.workspace().is_dir(dest) {
            return Err(Error::InvalidArgument(format!(
                "target '{}' is not a directory",
                path_string(dest)
            )));
        }

        let mut workspace = self.workspace().clone();
        for src in sources.iter().map(|src| parse_path(src)) {
            let node = workspace
                .get(&src)
                .ok_or_else(|| Error::PathNotFound(path_string(&src)))?;
            if !allow_dirs && !node.is_leaf() {
                return Err(Error::InvalidArgument(format!(
                    "-r not provided: omitting directory '{}'",
                    path_string(&src)
                )));
            }

            let target = target_path(&workspace, &src, &node, dest)?;
            debug!(src = %path_string(&src), dest = %path_string(&target), keep_src, "relocating");
            workspace = workspace.relocate(&src, &target, keep_src)?;
        }

        Ok(workspace)
    }
}

/// Final path of `src` when sent to `dest`
///
/// An existing directory at `dest` receives `src` under its own name. Files
/// and directories never replace each other.
fn target_path(
    workspace: &Workspace,
    src: &[String],
    node: &FileNode,
    dest: &[String],
) -> Result<FilePath> {
    let name = src
        .last()
        .ok_or_else(|| Error::InvalidPath(String::from("cannot move the root directory")))?;

    let target = if workspace.is_dir(dest) {
        [dest, std::slice::from_ref(name)].concat()
    } else {
        dest.to_vec()
    };

    if target == src {
        return Ok(target);
    }

    match (workspace.get(&target), node.is_leaf()) {
        (Some(TreeNode::Internal(_)), true) => Err(Error::InvalidArgument(format!(
            "cannot overwrite directory '{}' with a file",
            path_string(&target)
        ))),
        (Some(TreeNode::Leaf(_)), false) => Err(Error::InvalidArgument(format!(
            "cannot overwrite file '{}' with a directory",
            path_string(&target)
        ))),
        _ => Ok(target),
    }
}
