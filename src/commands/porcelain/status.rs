use crate::areas::database::describe;
use crate::areas::index::Index;
use crate::areas::repository::Sandbox;
use crate::artifacts::core::FilePath;
use crate::artifacts::diff::tree_diff::{ChangeKind, TreeChange, compare_trees};
use crate::artifacts::index::index_tree::IndexTree;
use crate::artifacts::status::file_change::{ChangeArea, FileChange, UntrackedPath};
use crate::artifacts::status::status_info::StatusInfo;
use crate::artifacts::tree::TreeNode;
use crate::errors::{Error, Result};
use tracing::debug;

impl Sandbox {
    /// Compare HEAD, the index and the working file system
    ///
    /// Staged changes are HEAD vs index, unstaged changes are index vs working
    /// file system. Files the index does not know about are untracked; a new
    /// directory is reported once instead of file by file. Empty directories
    /// hold no files and never show up.
    pub fn status(&self) -> Result<StatusInfo> {
        let repository = self.repository();
        let database = repository.database();

        let head_tree = match repository.head().resolve(repository.refs())? {
            Some(commit_id) => {
                let commit = database.read_commit(&commit_id).ok_or_else(|| {
                    Error::Corrupted(format!(
                        "HEAD resolves to {commit_id}, which is {}",
                        describe(database.read(&commit_id))
                    ))
                })?;
                Index::from_git_tree(commit.work_tree(), database)?.to_tree()?
            }
            None => IndexTree::new(),
        };
        let index_tree = repository.index().to_tree()?;

        // Hash the working files against a scratch copy of the store.
        let (work_index, _) = Index::from_file_tree(self.workspace().tree(), database, &[])?;
        let work_tree = work_index.to_tree()?;

        let mut info = StatusInfo {
            branch: repository.head().branch(),
            ..StatusInfo::default()
        };

        for change in compare_trees(&head_tree, &index_tree) {
            for path in file_paths(&change, &head_tree, &index_tree) {
                info.push(FileChange {
                    path,
                    kind: change.kind,
                    area: ChangeArea::Staged,
                });
            }
        }

        for change in compare_trees(&index_tree, &work_tree) {
            if change.kind == ChangeKind::Added {
                let is_dir = matches!(work_tree.get(&change.path), Some(TreeNode::Internal(_)));
                info.untracked.push(UntrackedPath {
                    path: change.path,
                    is_dir,
                });
                continue;
            }

            for path in file_paths(&change, &index_tree, &work_tree) {
                info.push(FileChange {
                    path,
                    kind: change.kind,
                    area: ChangeArea::Unstaged,
                });
            }
        }

        debug!(
            staged = info.staged.len(),
            unstaged = info.unstaged.len(),
            untracked = info.untracked.len(),
            "computed status"
        );
        Ok(info)
    }
}

/// Files behind a change: the change itself for a file, every file below it for a directory
fn file_paths(change: &TreeChange<String>, base: &IndexTree, other: &IndexTree) -> Vec<FilePath> {
    let side = match change.kind {
        ChangeKind::Deleted => base,
        ChangeKind::Added | ChangeKind::Modified => other,
    };

    match side.subtree(&change.path) {
        Some(subtree) => subtree
            .to_leaf_array(|a, b| a.cmp(b), &change.path)
            .into_iter()
            .map(|leaf| leaf.path)
            .collect(),
        None => vec![change.path.clone()],
    }
}
