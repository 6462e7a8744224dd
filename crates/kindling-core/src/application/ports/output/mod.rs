//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `kindling-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::ExistsPolicy;
use crate::error::KindlingResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `kindling_adapters::filesystem::LocalFilesystem` (production)
/// - `kindling_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - "Not found" is a value (`Ok(None)`), every other read problem is a
///   `ReadFailure`
/// - `write_file` enforces the existence policy and creates parent directories
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Read a UTF-8 file. `Ok(None)` when nothing exists at `path`.
    fn read_file(&self, path: &Path) -> KindlingResult<Option<String>>;

    /// Write content to a file.
    ///
    /// With [`ExistsPolicy::Error`] an existing target yields
    /// `ExistingFileConflict` and is left untouched.
    fn write_file(&self, path: &Path, content: &str, policy: ExistsPolicy) -> KindlingResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> KindlingResult<()>;
}

/// Port for template storage.
///
/// A read-only namespace of relative, `/`-separated paths.
///
/// Implemented by:
/// - `kindling_adapters::template_store::InMemoryStore` (bundled templates)
/// - `kindling_adapters::template_store::DirectoryStore` (user template directory)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Every leaf entry in the store.
    ///
    /// Fails with `StoreUnavailable` when the namespace cannot be walked.
    fn list(&self) -> KindlingResult<Vec<String>>;

    /// Raw bytes of one entry.
    fn read(&self, path: &str) -> KindlingResult<Vec<u8>>;
}
