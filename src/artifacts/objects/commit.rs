//! Commit object
//!
//! A commit records a message, the moment it was made, the commit it follows
//! (none for the first commit of a history) and the tree it snapshots.
//!
//! ## Format
//!
//! `<message><parent oid or nothing><work tree oid><timestamp>` where the
//! timestamp is UTC RFC 3339 with millisecond precision, e.g.
//! `2024-05-01T12:30:00.250Z`. Timestamps are truncated to milliseconds on
//! construction so a commit always hashes the way it prints.

use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommit {
    message: String,
    timestamp: DateTime<Utc>,
    parent: Option<ObjectId>,
    work_tree: ObjectId,
}

impl GitCommit {
    pub fn new(
        message: String,
        timestamp: DateTime<Utc>,
        parent: Option<ObjectId>,
        work_tree: ObjectId,
    ) -> Self {
        GitCommit {
            message,
            timestamp: timestamp.trunc_subsecs(3),
            parent,
            work_tree,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the message
    pub fn title_line(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn work_tree(&self) -> &ObjectId {
        &self.work_tree
    }

    pub fn timestamp_string(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl Packable for GitCommit {
    fn serialize(&self) -> Bytes {
        let parent = self.parent.as_ref().map(AsRef::as_ref).unwrap_or_default();
        Bytes::from(format!(
            "{}{}{}{}",
            self.message,
            parent,
            self.work_tree,
            self.timestamp_string()
        ))
    }
}

impl Object for GitCommit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = vec![format!("tree {}", self.work_tree)];
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {parent}"));
        }
        lines.push(format!("date {}", self.timestamp_string()));
        lines.push(String::new());
        lines.push(self.message.clone());
        lines.join("\n")
    }
}
