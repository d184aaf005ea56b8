use crate::artifacts::status::file_change::{ChangeArea, FileChange, UntrackedPath};
use colored::Colorize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    /// Branch HEAD is attached to, `None` when detached
    pub branch: Option<String>,
    pub staged: Vec<FileChange>,
    pub unstaged: Vec<FileChange>,
    pub untracked: Vec<UntrackedPath>,
}

impl StatusInfo {
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty() && self.unstaged.is_empty() && self.untracked.is_empty()
    }

    /// Porcelain-style listing: staged, then unstaged, then untracked
    pub fn short_lines(&self) -> Vec<String> {
        self.staged
            .iter()
            .chain(self.unstaged.iter())
            .map(FileChange::short_line)
            .chain(
                self.untracked
                    .iter()
                    .map(|untracked| format!("?? {}", untracked.display_path())),
            )
            .collect()
    }

    /// Human readable report, grouped by area
    pub fn long_format(&self) -> String {
        let mut lines = match &self.branch {
            Some(branch) => vec![format!("On branch {branch}")],
            None => vec![String::from("HEAD detached")],
        };

        let mut section = |title: &str, changes: &[FileChange]| {
            if !changes.is_empty() {
                lines.push(String::new());
                lines.push(String::from(title));
                lines.extend(changes.iter().map(FileChange::long_line));
            }
        };
        section("Changes to be committed:", &self.staged);
        section("Changes not staged for commit:", &self.unstaged);

        if !self.untracked.is_empty() {
            lines.push(String::new());
            lines.push(String::from("Untracked files:"));
            lines.extend(
                self.untracked
                    .iter()
                    .map(|untracked| format!("\t{}", untracked.display_path()).red().to_string()),
            );
        }

        if self.is_clean() {
            lines.push(String::from("nothing to commit, working tree clean"));
        }

        lines.join("\n")
    }

    pub(crate) fn push(&mut self, change: FileChange) {
        match change.area {
            ChangeArea::Staged => self.staged.push(change),
            ChangeArea::Unstaged => self.unstaged.push(change),
        }
    }
}
