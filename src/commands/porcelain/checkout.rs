use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::repository::{Sandbox, Transition};
use crate::areas::workspace::{FileTree, Workspace};
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use tracing::{debug, info};

/// Everything a commit restores: its files and the matching index
pub(crate) struct Snapshot {
    pub(crate) commit_id: ObjectId,
    pub(crate) title: String,
    pub(crate) files: FileTree,
    pub(crate) index: Index,
}

impl Snapshot {
    pub(crate) fn load(database: &Database, commit_id: &ObjectId) -> Result<Self> {
        let commit = database.load_commit(commit_id)?;
        let work_tree = database.load_work_tree(commit)?;
        let files = database.materialize_tree(work_tree)?;
        let index = Index::from_git_tree(commit.work_tree(), database)?;

        debug!(%commit_id, entries = index.len(), "loaded snapshot");
        Ok(Snapshot {
            commit_id: commit_id.clone(),
            title: commit.title_line().to_string(),
            files,
            index,
        })
    }

    pub(crate) fn summary(&self) -> String {
        format!(
            "HEAD is now at {} {}",
            self.commit_id.to_short_oid(),
            self.title
        )
    }
}

impl Sandbox {
    /// Replace the working file system and the index with the files of `target`
    ///
    /// A branch name attaches HEAD to that branch and a bare `HEAD` leaves it
    /// where it is; any other revision (a commit ID, `HEAD~2`, ...) detaches
    /// HEAD at the commit it names.
    pub fn checkout(&self, target: &str) -> Result<Transition> {
        let target = target.trim();
        if target.is_empty() {
            return Err(Error::InvalidArgument(String::from("missing target commit")));
        }

        let repository = self.repository();
        let revision = Revision::try_parse(target)?;
        let commit_id = revision.resolve(repository)?;
        let snapshot = Snapshot::load(repository.database(), &commit_id)?;

        let (head, message) = match &revision {
            Revision::Head => (repository.head().clone(), snapshot.summary()),
            Revision::Ref(name) if repository.refs().read_leaf(&name.ref_path()).is_ok() => (
                repository.head().attach_to(name.ref_path()),
                format!("Switched to branch '{name}'"),
            ),
            _ => (repository.head().detach_to(commit_id), snapshot.summary()),
        };

        info!(revision = target, detached = head.is_detached(), "checked out");
        let repository = repository
            .clone()
            .with_index(snapshot.index)
            .with_head(head);

        Ok(Transition::with_message(
            self.with_parts(Workspace::from_tree(snapshot.files), repository),
            message,
        ))
    }
}
