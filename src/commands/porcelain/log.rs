use crate::areas::database::describe;
use crate::areas::refs::Head;
use crate::areas::repository::Sandbox;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::core::path_string;
use crate::artifacts::objects::commit::GitCommit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use colored::Colorize;
use std::collections::HashMap;

/// One commit of the history, with the refs pointing at it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub commit_id: ObjectId,
    pub commit: GitCommit,
    /// `HEAD -> main`, `HEAD`, branch names, in that order
    pub decorations: Vec<String>,
}

impl LogEntry {
    fn decoration(&self) -> String {
        if self.decorations.is_empty() {
            String::new()
        } else {
            format!(" ({})", self.decorations.join(", "))
                .yellow()
                .to_string()
        }
    }

    /// `<short id> (<refs>) <title>`
    pub fn oneline(&self) -> String {
        format!(
            "{}{} {}",
            self.commit_id.to_short_oid().yellow(),
            self.decoration(),
            self.commit.title_line()
        )
    }

    pub fn medium(&self) -> String {
        let mut lines = vec![
            format!(
                "{}{}",
                format!("commit {}", self.commit_id).yellow(),
                self.decoration()
            ),
            format!("Date:   {}", self.commit.timestamp_string()),
            String::new(),
        ];
        lines.extend(
            self.commit
                .message()
                .lines()
                .map(|line| format!("    {line}")),
        );
        lines.join("\n")
    }
}

impl Sandbox {
    /// History reachable from `start` (HEAD by default), newest first
    ///
    /// A branch without commits has an empty history.
    pub fn log(&self, start: Option<&str>) -> Result<Vec<LogEntry>> {
        let repository = self.repository();
        let database = repository.database();

        let mut next = match start {
            Some(revision) => Some(Revision::try_parse(revision)?.resolve(repository)?),
            None => repository.head().resolve(repository.refs())?,
        };
        let decorations = self.decorations();

        let mut entries = Vec::new();
        while let Some(commit_id) = next {
            let commit = database.read_commit(&commit_id).ok_or_else(|| {
                Error::Corrupted(format!(
                    "history refers to {commit_id}, which is {}",
                    describe(database.read(&commit_id))
                ))
            })?;

            next = commit.parent().cloned();
            entries.push(LogEntry {
                decorations: decorations.get(&commit_id).cloned().unwrap_or_default(),
                commit_id,
                commit: commit.clone(),
            });
        }

        Ok(entries)
    }

    fn decorations(&self) -> HashMap<ObjectId, Vec<String>> {
        let repository = self.repository();
        let head = repository.head();
        let mut decorations: HashMap<ObjectId, Vec<String>> = HashMap::new();

        if let Head::Detached(commit_id) = head {
            decorations
                .entry(commit_id.clone())
                .or_default()
                .push(String::from("HEAD"));
        }

        for item in repository.refs().list() {
            let name = path_string(&item.path);
            let labels = decorations.entry(item.value).or_default();
            match head {
                Head::Stable(path) if *path == item.path => {
                    labels.insert(0, format!("HEAD -> {name}"));
                }
                _ => labels.push(name),
            }
        }

        decorations
    }
}
