use crate::areas::database::{Database, describe};
use crate::areas::repository::{Sandbox, Transition};
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::commit::GitCommit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::GitTree;
use crate::artifacts::tree::{Children, TreeNode};
use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use derive_new::new;
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct CommitOptions {
    pub message: String,
    /// Commit time, the configured or current time when unset
    #[new(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Sandbox {
    /// Record the index as a new commit on top of HEAD
    ///
    /// The working file system and the index are left as they are; only the
    /// object store and HEAD (or the branch it is attached to) change.
    pub fn commit(&self, options: &CommitOptions) -> Result<Transition> {
        if options.message.trim().is_empty() {
            return Err(Error::InvalidArgument(String::from("missing commit message")));
        }

        let repository = self.repository();
        let index_tree = repository.index().to_tree()?;

        let mut database = repository.database().clone();
        let tree_id = write_tree(&mut database, index_tree.root(), &mut Vec::new())?;

        let parent = repository.head().resolve(repository.refs())?;
        let is_root = match parent {
            Some(_) => "",
            None => "(root-commit) ",
        };

        let timestamp = options.timestamp.unwrap_or_else(|| self.commit_time());
        let commit = GitCommit::new(options.message.clone(), timestamp, parent, tree_id);
        let title = commit.title_line().to_string();
        let commit_id = database.store(commit)?;

        let (head, refs) = repository
            .head()
            .advance(repository.refs(), commit_id.clone())?;
        let location = head
            .branch()
            .unwrap_or_else(|| String::from("detached HEAD"));

        info!(%commit_id, %location, "committed");
        let repository = repository
            .clone()
            .with_database(database)
            .with_refs(refs)
            .with_head(head);

        Ok(Transition::with_message(
            self.with_repository(repository),
            format!("[{location} {is_root}{}] {title}", commit_id.to_short_oid()),
        ))
    }
}

/// Store the tree objects for `children`, innermost first, and return the root tree ID
///
/// Index entries already name stored blobs, so leaves contribute their ID as is.
fn write_tree(
    database: &mut Database,
    children: &Children<IndexEntry, String>,
    path: &mut Vec<String>,
) -> Result<ObjectId> {
    let mut items = BTreeMap::new();

    for (name, node) in children {
        path.push(name.clone());
        let oid = match node {
            TreeNode::Leaf(entry) => {
                if database.read_blob(&entry.oid).is_none() {
                    return Err(Error::Corrupted(format!(
                        "index entry '{}' points to {}",
                        path.join("/"),
                        describe(database.read(&entry.oid))
                    )));
                }
                entry.oid.clone()
            }
            TreeNode::Internal(subtree) => write_tree(database, subtree, path)?,
        };
        path.pop();

        items.insert(name.clone(), oid);
    }

    let tree_id = database.store(GitTree::new(items))?;
    debug!(%tree_id, path = %path.join("/"), "stored tree");
    Ok(tree_id)
}
