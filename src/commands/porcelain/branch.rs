use crate::areas::refs::Head;
use crate::areas::repository::{Sandbox, Transition};
use crate::artifacts::branch::HEAD_REF_NAME;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::core::path_string;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use colored::Colorize;
use derive_new::new;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct BranchOptions {
    pub name: String,
    /// Revision the branch starts at, HEAD when unset
    #[new(default)]
    pub start_point: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchInfo {
    pub name: String,
    pub commit_id: ObjectId,
    /// HEAD is attached to this branch
    pub is_current: bool,
}

impl BranchInfo {
    pub fn display(&self) -> String {
        if self.is_current {
            format!("* {}", self.name.green())
        } else {
            format!("  {}", self.name)
        }
    }
}

impl Sandbox {
    pub fn create_branch(&self, options: &BranchOptions) -> Result<Transition> {
        let name = BranchName::try_parse(options.name.trim())?;
        let start_point = options.start_point.as_deref().unwrap_or(HEAD_REF_NAME);

        let repository = self.repository();
        let commit_id = Revision::try_parse(start_point)?.resolve(repository)?;
        repository.database().load_commit(&commit_id)?;

        let refs = repository
            .refs()
            .create(&name.ref_path(), commit_id.clone())
            .map_err(|err| match err {
                Error::AlreadyExists(_) => {
                    Error::InvalidArgument(format!("a branch named '{name}' already exists"))
                }
                other => other,
            })?;

        info!(%name, %commit_id, "created branch");
        Ok(Transition::silent(
            self.with_repository(repository.clone().with_refs(refs)),
        ))
    }

    /// Delete a branch; the branch HEAD is attached to cannot be deleted
    pub fn delete_branch(&self, name: &str) -> Result<Transition> {
        let name = BranchName::try_parse(name.trim())?;
        let path = name.ref_path();
        let repository = self.repository();

        if matches!(repository.head(), Head::Stable(current) if *current == path) {
            return Err(Error::InvalidArgument(format!(
                "cannot delete branch '{name}' checked out"
            )));
        }

        let commit_id = repository
            .refs()
            .read_leaf(&path)
            .map_err(|_| Error::InvalidArgument(format!("branch '{name}' not found")))?;
        let refs = repository.refs().delete(&path)?;

        info!(%name, "deleted branch");
        Ok(Transition::with_message(
            self.with_repository(repository.clone().with_refs(refs)),
            format!("Deleted branch {name} (was {}).", commit_id.to_short_oid()),
        ))
    }

    /// Every branch in name order
    pub fn list_branches(&self) -> Vec<BranchInfo> {
        let repository = self.repository();
        repository
            .refs()
            .list()
            .into_iter()
            .map(|item| BranchInfo {
                name: path_string(&item.path),
                is_current: matches!(repository.head(), Head::Stable(path) if *path == item.path),
                commit_id: item.value,
            })
            .collect()
    }
}
