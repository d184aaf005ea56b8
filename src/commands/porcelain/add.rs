use crate::areas::index::Index;
use crate::areas::repository::{Sandbox, Transition};
use crate::artifacts::core::{parse_path, path_string};
use crate::errors::{Error, Result};
use tracing::debug;

impl Sandbox {
    /// Stage the given paths
    ///
    /// Each path replaces its whole index section with what the working file
    /// system holds there now: new and edited files are staged, files gone
    /// from the working file system are unstaged. A path that exists in
    /// neither place is rejected, and so is the whole command.
    pub fn add(&self, paths: &[String]) -> Result<Transition> {
        if paths.is_empty() {
            return Err(Error::InvalidArgument(String::from("missing path operand")));
        }

        let repository = self.repository();
        let mut database = repository.database().clone();
        let mut index = repository.index().clone();

        for raw_path in paths {
            let path = parse_path(raw_path);

            let sub_index = match self.workspace().get(&path) {
                Some(node) => {
                    let (sub_index, next_database) =
                        Index::from_file_node(&node, &database, &path)?;
                    database = next_database;
                    sub_index
                }
                None if !index.section(&path).is_empty() => Index::new(),
                None => {
                    return Err(Error::InvalidArgument(format!(
                        "pathspec '{}' did not match any files",
                        raw_path.trim()
                    )));
                }
            };

            debug!(path = %path_string(&path), entries = sub_index.len(), "staging path");
            index = index.overwrite_section(&path, &sub_index)?;
        }

        let repository = repository
            .clone()
            .with_database(database)
            .with_index(index);
        Ok(Transition::silent(self.with_repository(repository)))
    }
}
