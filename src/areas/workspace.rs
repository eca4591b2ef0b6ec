use crate::artifacts::objects::tree::EntryMode;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A regular file or directory directly inside a workspace directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceEntry {
    pub name: String,
    pub path: PathBuf,
    pub mode: EntryMode,
}

impl WorkspaceEntry {
    pub fn is_dir(&self) -> bool {
        self.mode.is_tree()
    }
}

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// Read a whole file into memory; relative paths resolve against the workspace root
    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_path);
        let data = std::fs::read(&file_path)
            .with_context(|| format!("Unable to read file {}", file_path.display()))?;

        Ok(Bytes::from(data))
    }

    /// Direct children of `dir_path` that belong in a tree, sorted by name
    ///
    /// Hidden entries (names starting with `.`, which covers `.git`) and
    /// anything that is neither a regular file nor a directory are skipped.
    pub fn list_dir(&self, dir_path: Option<&Path>) -> anyhow::Result<Vec<WorkspaceEntry>> {
        let dir_path = match dir_path {
            Some(p) => self.path.join(p),
            None => self.path.to_path_buf(),
        };

        if !dir_path.is_dir() {
            anyhow::bail!("The specified path is not a directory: {:?}", dir_path);
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&dir_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.with_context(|| format!("Unable to list {}", dir_path.display()))?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
                continue;
            };
            if Self::is_ignored(&name) {
                continue;
            }

            let file_type = entry.file_type();
            let mode = if file_type.is_dir() {
                EntryMode::DIRECTORY
            } else if file_type.is_file() {
                if is_executable::is_executable(entry.path()) {
                    EntryMode::EXECUTABLE
                } else {
                    EntryMode::REGULAR
                }
            } else {
                continue;
            };

            entries.push(WorkspaceEntry {
                name,
                path: entry.into_path(),
                mode,
            });
        }

        Ok(entries)
    }

    fn is_ignored(name: &str) -> bool {
        name.starts_with('.')
    }
}
