use crate::areas::repository::{Sandbox, Transition};
use crate::errors::Result;

impl Sandbox {
    /// Create empty directories; parents must already exist
    pub fn mkdir(&self, paths: &[String]) -> Result<Transition> {
        self.for_each_path(paths, "missing path operand", |workspace, path| {
            workspace.mkdir(path)
        })
    }

    /// Create files with fresh content
    pub fn create(&self, paths: &[String]) -> Result<Transition> {
        self.for_each_path(paths, "missing path operand", |workspace, path| {
            workspace.create_file(path)
        })
    }

    /// Write a new version of each file
    pub fn edit(&self, paths: &[String]) -> Result<Transition> {
        self.for_each_path(paths, "missing path operand", |workspace, path| {
            workspace.edit_file(path)
        })
    }

    /// Delete files, and directories when `recursive` is set
    pub fn rm(&self, paths: &[String], recursive: bool) -> Result<Transition> {
        self.for_each_path(paths, "missing file operand", |workspace, path| {
            workspace.remove(path, recursive)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::areas::repository::Sandbox;
    use crate::artifacts::core::parse_path;
    use crate::errors::Error;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn args(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|path| path.to_string()).collect()
    }

    #[fixture]
    fn sandbox() -> Sandbox {
        let sandbox = Sandbox::default();
        let sandbox = sandbox.mkdir(&args(&["dir1"])).unwrap().sandbox;
        sandbox
            .create(&args(&["dir1/file1", "file4"]))
            .unwrap()
            .sandbox
    }

    #[rstest]
    fn commands_without_operands_are_rejected(sandbox: Sandbox) {
        assert!(matches!(sandbox.mkdir(&[]), Err(Error::InvalidArgument(_))));
        assert!(matches!(sandbox.create(&[]), Err(Error::InvalidArgument(_))));
        assert!(matches!(sandbox.edit(&[]), Err(Error::InvalidArgument(_))));
        let err = sandbox.rm(&[], true).unwrap_err();
        assert_eq!(err.to_string(), "missing file operand");
    }

    #[rstest]
    fn mkdir_needs_an_existing_parent(sandbox: Sandbox) {
        assert!(sandbox.mkdir(&args(&["dir1/dir2"])).is_ok());
        assert!(sandbox.mkdir(&args(&["dir3/dir4"])).is_err());
        assert!(sandbox.mkdir(&args(&["file4/dir5"])).is_err());
    }

    #[rstest]
    fn failing_path_discards_the_earlier_ones(sandbox: Sandbox) {
        let result = sandbox.create(&args(&["file5", "missing/file6"]));

        assert!(result.is_err());
        assert!(sandbox.workspace().get(&parse_path("file5")).is_none());
    }

    #[rstest]
    fn edit_changes_content_but_not_identity(sandbox: Sandbox) {
        let edited = sandbox.edit(&args(&["dir1/file1"])).unwrap().sandbox;

        let before = sandbox.workspace().tree().get_leaf(&parse_path("dir1/file1")).unwrap();
        let after = edited.workspace().tree().get_leaf(&parse_path("dir1/file1")).unwrap();
        assert_eq!(before.content_token(), after.content_token());
        assert_eq!(after.version(), 1);
    }

    #[rstest]
    fn rm_refuses_directories_unless_recursive(sandbox: Sandbox) {
        let err = sandbox.rm(&args(&["dir1"]), false).unwrap_err();
        assert_eq!(err.to_string(), "'dir1': is a directory");

        let removed = sandbox.rm(&args(&["dir1", "file4"]), true).unwrap().sandbox;
        assert!(removed.workspace().tree().is_empty());
    }
}
