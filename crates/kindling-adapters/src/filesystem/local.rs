//! Local filesystem adapter using std::fs.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use kindling_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::ExistsPolicy,
    error::{KindlingError, KindlingResult},
};
use tracing::trace;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn read_file(&self, path: &Path) -> KindlingResult<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ApplicationError::ReadFailure {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()),
        }
    }

    fn write_file(&self, path: &Path, content: &str, policy: ExistsPolicy) -> KindlingResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.create_dir_all(parent)?;
        }

        // create_new makes the existence check and the create one step.
        let mut options = OpenOptions::new();
        options.write(true);
        match policy {
            ExistsPolicy::Error => options.create_new(true),
            ExistsPolicy::Overwrite => options.create(true).truncate(true),
        };

        let mut file = options.open(path).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => ApplicationError::ExistingFileConflict {
                path: path.to_path_buf(),
            }
            .into(),
            _ => map_write_error(path, e),
        })?;

        file.write_all(content.as_bytes())
            .map_err(|e| map_write_error(path, e))?;

        trace!(path = %path.display(), bytes = content.len(), "File written");
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> KindlingResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_write_error(path, e))
    }
}

fn map_write_error(path: &Path, e: io::Error) -> KindlingError {
    ApplicationError::WriteFailure {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}
