//! Repository aggregate and sandbox state
//!
//! A `Sandbox` bundles the working file system with the repository (object
//! store, index, refs and HEAD). It is an immutable value: every command takes
//! `&self` and, on success, returns a [`Transition`] holding the next sandbox.
//! On failure the caller simply keeps the sandbox it already has, so a
//! rejected command can never leave anything half-applied.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::{Head, Refs};
use crate::areas::workspace::Workspace;
use crate::config::SandboxConfig;
use crate::errors::Result;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    database: Database,
    index: Index,
    refs: Refs,
    head: Head,
}

impl Repository {
    pub fn new(config: &SandboxConfig) -> Self {
        Repository {
            database: Database::new(),
            index: Index::new(),
            refs: Refs::new(),
            head: Head::new(&config.default_branch),
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    /// Swap the object store, e.g. to seed objects written with `Database::write`
    pub fn with_database(self, database: Database) -> Self {
        Repository { database, ..self }
    }

    pub(crate) fn with_index(self, index: Index) -> Self {
        Repository { index, ..self }
    }

    pub(crate) fn with_refs(self, refs: Refs) -> Self {
        Repository { refs, ..self }
    }

    pub(crate) fn with_head(self, head: Head) -> Self {
        Repository { head, ..self }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sandbox {
    workspace: Workspace,
    repository: Repository,
    config: SandboxConfig,
}

/// Outcome of a successful command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub sandbox: Sandbox,
    /// One-line report for the user, empty when there is nothing to say
    pub message: String,
}

impl Transition {
    pub fn silent(sandbox: Sandbox) -> Self {
        Transition {
            sandbox,
            message: String::new(),
        }
    }

    pub fn with_message(sandbox: Sandbox, message: impl Into<String>) -> Self {
        Transition {
            sandbox,
            message: message.into(),
        }
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Sandbox::new(SandboxConfig::default())
    }
}

impl Sandbox {
    pub fn new(config: SandboxConfig) -> Self {
        Sandbox {
            workspace: Workspace::new(),
            repository: Repository::new(&config),
            config,
        }
    }

    /// Sandbox configured from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Sandbox::new(SandboxConfig::load_from_env()?))
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Timestamp for a commit made now
    pub(crate) fn commit_time(&self) -> DateTime<Utc> {
        self.config.commit_date.unwrap_or_else(Utc::now)
    }

    pub(crate) fn with_workspace(&self, workspace: Workspace) -> Self {
        Sandbox {
            workspace,
            ..self.clone()
        }
    }

    pub fn with_repository(&self, repository: Repository) -> Self {
        Sandbox {
            repository,
            ..self.clone()
        }
    }

    pub(crate) fn with_parts(&self, workspace: Workspace, repository: Repository) -> Self {
        Sandbox {
            workspace,
            repository,
            config: self.config.clone(),
        }
    }
}
