//! Sandbox configuration
//!
//! Settings come from the environment, the same way commit authorship is read
//! from `GIT_AUTHOR_*` variables by git:
//!
//! - `GITSIM_DEFAULT_BRANCH`: branch HEAD is attached to in a fresh sandbox (`main`)
//! - `GITSIM_COMMIT_DATE`: fixed commit timestamp, RFC 3339 or RFC 2822; commits
//!   use the current time when unset

use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::Result;
use chrono::{DateTime, Utc};
use tracing::warn;

pub const DEFAULT_BRANCH_NAME: &str = "main";
pub const DEFAULT_BRANCH_ENV: &str = "GITSIM_DEFAULT_BRANCH";
pub const COMMIT_DATE_ENV: &str = "GITSIM_COMMIT_DATE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxConfig {
    pub default_branch: BranchName,
    pub commit_date: Option<DateTime<Utc>>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        SandboxConfig {
            default_branch: BranchName::try_parse(DEFAULT_BRANCH_NAME).unwrap_or_default(),
            commit_date: None,
        }
    }
}

impl SandboxConfig {
    pub fn load_from_env() -> Result<Self> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = SandboxConfig::default();

        if let Some(branch) = lookup(DEFAULT_BRANCH_ENV) {
            config.default_branch = BranchName::try_parse(branch)?;
        }

        config.commit_date = lookup(COMMIT_DATE_ENV).and_then(|date_str| {
            let parsed = DateTime::parse_from_rfc3339(&date_str)
                .or_else(|_| DateTime::parse_from_rfc2822(&date_str))
                .map(|date| date.with_timezone(&Utc));
            match parsed {
                Ok(date) => Some(date),
                Err(err) => {
                    warn!(value = %date_str, %err, "ignoring unparsable {COMMIT_DATE_ENV}");
                    None
                }
            }
        });

        Ok(config)
    }

    pub fn with_default_branch(self, name: impl Into<String>) -> Result<Self> {
        Ok(SandboxConfig {
            default_branch: BranchName::try_parse(name)?,
            ..self
        })
    }
}
