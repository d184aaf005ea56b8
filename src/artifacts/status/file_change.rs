use crate::artifacts::core::{FilePath, path_string};
use crate::artifacts::diff::tree_diff::ChangeKind;
use colored::Colorize;

const LABEL_WIDTH: usize = 12;

/// Where a change sits between HEAD, the index and the working file system
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeArea {
    /// HEAD tree vs index
    Staged,
    /// index vs working file system
    Unstaged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: FilePath,
    pub kind: ChangeKind,
    pub area: ChangeArea,
}

impl FileChange {
    fn code(&self) -> &'static str {
        match self.kind {
            ChangeKind::Added => "A",
            ChangeKind::Modified => "M",
            ChangeKind::Deleted => "D",
        }
    }

    /// Two-column short form (`A  path` when staged, ` M path` when not)
    pub fn short_line(&self) -> String {
        match self.area {
            ChangeArea::Staged => format!("{}  {}", self.code(), path_string(&self.path)),
            ChangeArea::Unstaged => format!(" {} {}", self.code(), path_string(&self.path)),
        }
    }

    /// Long form with a colored label
    pub fn long_line(&self) -> String {
        let label = format!("{:<width$}", format!("{}:", self.kind), width = LABEL_WIDTH);
        let line = format!("\t{label}{}", path_string(&self.path));
        match self.area {
            ChangeArea::Staged => line.green().to_string(),
            ChangeArea::Unstaged => line.red().to_string(),
        }
    }
}

/// A working file system path unknown to the index
///
/// Directories holding nothing tracked are reported as a whole, with a
/// trailing `/`, instead of file by file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct UntrackedPath {
    pub path: FilePath,
    pub is_dir: bool,
}

impl UntrackedPath {
    pub fn display_path(&self) -> String {
        if self.is_dir {
            format!("{}/", path_string(&self.path))
        } else {
            path_string(&self.path)
        }
    }
}
