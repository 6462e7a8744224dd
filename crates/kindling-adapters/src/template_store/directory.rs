//! Template store backed by a directory tree.
//!
//! Lets users replace the bundled templates with their own. Entries are the
//! `/`-separated paths of every regular file below the root, so a directory
//! laid out like `templates/` in this crate behaves exactly like the
//! bundled store.

use std::path::{Path, PathBuf};

use kindling_core::{
    application::{ApplicationError, ports::TemplateStore},
    error::KindlingResult,
};
use tracing::{debug, instrument};
use walkdir::WalkDir;

/// Read-only store over a directory of template files.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn unavailable(&self, reason: impl Into<String>) -> ApplicationError {
        ApplicationError::StoreUnavailable {
            reason: format!("{}: {}", self.root.display(), reason.into()),
        }
    }
}

impl TemplateStore for DirectoryStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn list(&self) -> KindlingResult<Vec<String>> {
        if !self.root.is_dir() {
            return Err(self.unavailable("not a directory").into());
        }

        let mut entries = Vec::new();
        for walk_entry in WalkDir::new(&self.root).min_depth(1).sort_by_file_name() {
            let walk_entry = walk_entry.map_err(|e| self.unavailable(e.to_string()))?;
            if !walk_entry.file_type().is_file() {
                continue;
            }

            let relative = walk_entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|e| self.unavailable(e.to_string()))?;
            let normalized = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            entries.push(normalized);
        }

        debug!(count = entries.len(), "Directory store enumerated");
        Ok(entries)
    }

    fn read(&self, path: &str) -> KindlingResult<Vec<u8>> {
        let full = self.root.join(path);
        std::fs::read(&full).map_err(|e| {
            ApplicationError::ReadFailure {
                path: full,
                reason: e.to_string(),
            }
            .into()
        })
    }
}
