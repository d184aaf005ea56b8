use crate::areas::repository::{Sandbox, Transition};
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::revision::Revision;
use crate::commands::porcelain::checkout::Snapshot;
use crate::errors::Result;
use derive_new::new;
use tracing::info;

/// How much of the sandbox `reset` rewrites
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResetMode {
    /// HEAD (or its branch) only
    Soft,
    /// HEAD and the index
    #[default]
    Mixed,
    /// HEAD, the index and the working file system
    Hard,
}

impl ResetMode {
    pub fn as_str(&self) -> &str {
        match self {
            ResetMode::Soft => "soft",
            ResetMode::Mixed => "mixed",
            ResetMode::Hard => "hard",
        }
    }
}

impl std::fmt::Display for ResetMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct ResetOptions {
    pub target: String,
    #[new(default)]
    pub mode: ResetMode,
}

impl Sandbox {
    /// Move HEAD, or the branch it is attached to, to `target`
    pub fn reset(&self, options: &ResetOptions) -> Result<Transition> {
        let repository = self.repository();
        let commit_id = Revision::try_parse(&options.target)?.resolve(repository)?;

        // The target must be fully loadable whatever the mode.
        let snapshot = Snapshot::load(repository.database(), &commit_id)?;

        let (head, refs) = repository
            .head()
            .advance(repository.refs(), commit_id.clone())?;
        let repository = repository.clone().with_head(head).with_refs(refs);

        info!(%commit_id, mode = %options.mode, "reset");
        let transition = match options.mode {
            ResetMode::Soft => Transition::silent(self.with_repository(repository)),
            ResetMode::Mixed => {
                Transition::silent(self.with_repository(repository.with_index(snapshot.index)))
            }
            ResetMode::Hard => {
                let message = snapshot.summary();
                Transition::with_message(
                    self.with_parts(
                        Workspace::from_tree(snapshot.files),
                        repository.with_index(snapshot.index),
                    ),
                    message,
                )
            }
        };

        Ok(transition)
    }
}
