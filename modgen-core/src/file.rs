use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::Serialize;

/// What applying a [`FileChange`] does to the output tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// File does not exist yet
    Create,
    /// File exists with different content
    Update,
    /// File exists with identical content
    Skip,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Skip => "skip",
        }
    }

    /// Whether applying this action touches the disk.
    pub fn writes(&self) -> bool {
        !matches!(self, Action::Skip)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A planned change to a single generated file.
///
/// Paths are relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub path: PathBuf,
    pub content: String,
    pub action: Action,
}

impl FileChange {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>, action: Action) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            action,
        }
    }

    /// Get the absolute target path below `root`.
    pub fn target(&self, root: &Path) -> PathBuf {
        root.join(&self.path)
    }

    /// Write the content below `root` unless the action is [`Action::Skip`].
    ///
    /// Returns whether anything was written.
    pub fn apply(&self, root: &Path) -> std::io::Result<bool> {
        if !self.action.writes() {
            return Ok(false);
        }
        write_file(&self.target(root), &self.content)?;
        Ok(true)
    }
}

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}
